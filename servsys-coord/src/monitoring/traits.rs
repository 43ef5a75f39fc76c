//! Core monitoring traits.

// Layer 1: Standard library imports
use std::fmt::Debug;

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

// Layer 3: Internal module imports
use super::error::MonitoringError;
use super::types::MonitoringSnapshot;

/// Event severity levels, ordered from lowest to highest for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum EventSeverity {
    /// Detailed debugging events
    Debug,
    /// Normal operation events
    Info,
    /// Potential issues
    Warning,
    /// Failures
    Error,
}

/// An event a monitor can record.
pub trait MonitoringEvent: Send + Sync + Clone + Debug + Serialize + 'static {
    /// Static event type identifier for categorization.
    const EVENT_TYPE: &'static str;

    /// When the event occurred.
    fn timestamp(&self) -> DateTime<Utc>;

    /// Severity of the event.
    fn severity(&self) -> EventSeverity;
}

/// Observer for coordination events.
///
/// Implementations range from the zero-overhead [`NoopMonitor`] to the
/// history-keeping [`InMemoryMonitor`]; recording must never disturb the
/// coordination pipeline, so the coordinator ignores recording errors.
///
/// [`NoopMonitor`]: super::NoopMonitor
/// [`InMemoryMonitor`]: super::InMemoryMonitor
#[async_trait]
pub trait Monitor<E: MonitoringEvent>: Send + Sync + Clone {
    /// Records an event.
    ///
    /// # Errors
    ///
    /// Returns [`MonitoringError`] if the event cannot be recorded.
    async fn record(&self, event: E) -> Result<(), MonitoringError>;

    /// Produces a point-in-time snapshot of counters and recent history.
    ///
    /// # Errors
    ///
    /// Returns [`MonitoringError`] if the snapshot cannot be produced.
    async fn snapshot(&self) -> Result<MonitoringSnapshot<E>, MonitoringError>;

    /// Clears all recorded state.
    ///
    /// # Errors
    ///
    /// Returns [`MonitoringError`] if the state cannot be cleared.
    async fn reset(&self) -> Result<(), MonitoringError>;
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(EventSeverity::Debug < EventSeverity::Info);
        assert!(EventSeverity::Info < EventSeverity::Warning);
        assert!(EventSeverity::Warning < EventSeverity::Error);
    }
}
