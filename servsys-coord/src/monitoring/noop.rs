//! No-operation monitor.

// Layer 1: Standard library imports
use std::marker::PhantomData;

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use chrono::Utc;

// Layer 3: Internal module imports
use super::error::MonitoringError;
use super::traits::{Monitor, MonitoringEvent};
use super::types::MonitoringSnapshot;

/// Monitor that discards every event.
///
/// The default monitor for coordinators built without one. All operations
/// succeed and compile down to nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMonitor<E: MonitoringEvent> {
    _phantom: PhantomData<E>,
}

impl<E: MonitoringEvent> NoopMonitor<E> {
    /// Creates a no-op monitor.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

#[async_trait]
impl<E: MonitoringEvent> Monitor<E> for NoopMonitor<E> {
    #[inline(always)]
    async fn record(&self, _event: E) -> Result<(), MonitoringError> {
        Ok(())
    }

    #[inline(always)]
    async fn snapshot(&self) -> Result<MonitoringSnapshot<E>, MonitoringError> {
        Ok(MonitoringSnapshot {
            timestamp: Utc::now(),
            total_events: 0,
            debug_count: 0,
            info_count: 0,
            warning_count: 0,
            error_count: 0,
            recent_events: Vec::new(),
        })
    }

    #[inline(always)]
    async fn reset(&self) -> Result<(), MonitoringError> {
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::monitoring::types::{CoordinationEvent, CoordinationEventKind};

    #[tokio::test]
    async fn test_noop_discards_events() {
        let monitor = NoopMonitor::<CoordinationEvent>::new();

        for _ in 0..5 {
            let event =
                CoordinationEvent::now(None, "alpha", CoordinationEventKind::InstanceStarted);
            monitor.record(event).await.unwrap();
        }

        let snapshot = monitor.snapshot().await.unwrap();
        assert_eq!(snapshot.total_events, 0);
        assert!(snapshot.recent_events.is_empty());
    }

    #[tokio::test]
    async fn test_noop_reset_succeeds() {
        let monitor = NoopMonitor::<CoordinationEvent>::new();
        monitor.reset().await.unwrap();
    }
}
