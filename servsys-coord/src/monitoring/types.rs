//! Monitoring event and configuration types.

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc};
use serde::Serialize;

// Layer 3: Internal module imports
use super::traits::{EventSeverity, MonitoringEvent};
use crate::supervisor::ExitReason;

/// Configuration for monitoring behavior.
#[derive(Debug, Clone, Serialize)]
pub struct MonitoringConfig {
    /// Whether events are recorded at all
    pub enabled: bool,

    /// Maximum number of events kept in history
    pub max_history_size: usize,

    /// Minimum severity recorded; lower events are dropped
    pub severity_filter: EventSeverity,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_history_size: 1000,
            severity_filter: EventSeverity::Info,
        }
    }
}

/// Point-in-time view of a monitor's counters and recent history.
#[derive(Debug, Clone, Serialize)]
pub struct MonitoringSnapshot<E: MonitoringEvent> {
    /// When the snapshot was taken
    pub timestamp: DateTime<Utc>,

    /// Total events recorded since the last reset
    pub total_events: u64,

    /// Debug-level events recorded
    pub debug_count: u64,

    /// Info-level events recorded
    pub info_count: u64,

    /// Warning-level events recorded
    pub warning_count: u64,

    /// Error-level events recorded
    pub error_count: u64,

    /// Recent events, oldest first, bounded by `max_history_size`
    pub recent_events: Vec<E>,
}

/// One observed coordination action.
#[derive(Debug, Clone, Serialize)]
pub struct CoordinationEvent {
    /// When the action happened
    pub timestamp: DateTime<Utc>,

    /// Logical name of the coordinator, when one was configured
    pub coordinator: Option<String>,

    /// Spec id the action concerns
    pub spec_id: String,

    /// What happened
    pub kind: CoordinationEventKind,
}

impl CoordinationEvent {
    /// Builds an event stamped with the current time.
    pub fn now(
        coordinator: Option<String>,
        spec_id: impl Into<String>,
        kind: CoordinationEventKind,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            coordinator,
            spec_id: spec_id.into(),
            kind,
        }
    }
}

impl MonitoringEvent for CoordinationEvent {
    const EVENT_TYPE: &'static str = "coordination";

    fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    fn severity(&self) -> EventSeverity {
        match &self.kind {
            CoordinationEventKind::InstanceStarted => EventSeverity::Info,
            CoordinationEventKind::SpawnDeclined => EventSeverity::Debug,
            CoordinationEventKind::StopRequested => EventSeverity::Info,
            CoordinationEventKind::StopRefused { .. } => EventSeverity::Warning,
            CoordinationEventKind::InstanceTerminated { reason } => {
                if reason.is_abnormal() {
                    EventSeverity::Error
                } else {
                    EventSeverity::Info
                }
            }
            CoordinationEventKind::CascadeStop { .. } => EventSeverity::Warning,
            CoordinationEventKind::CascadeAborted { .. } => EventSeverity::Error,
            CoordinationEventKind::InstanceRestarted => EventSeverity::Warning,
            CoordinationEventKind::RestartFailed { .. } => EventSeverity::Error,
        }
    }
}

/// Specific kinds of coordination events.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum CoordinationEventKind {
    /// An instance was spawned and recorded
    InstanceStarted,

    /// The external supervisor declined a spawn without error
    SpawnDeclined,

    /// An explicit stop was accepted and delegated
    StopRequested,

    /// An explicit stop was refused because the spec is still needed
    StopRefused {
        /// Spec id of a running dependent
        needed_by: String,
    },

    /// A termination notification was processed
    InstanceTerminated {
        /// The exit reason carried by the notification
        reason: ExitReason,
    },

    /// A dependent was terminated as part of a cascade
    CascadeStop {
        /// Spec id of the terminated dependent
        dependent: String,
    },

    /// A cascade was abandoned for this spec
    CascadeAborted {
        /// Why the dependents could not be resolved
        error: String,
    },

    /// The spec was started again after an abnormal exit
    InstanceRestarted,

    /// The restart attempt failed
    RestartFailed {
        /// The error that stopped the restart
        error: String,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MonitoringConfig::default();
        assert!(config.enabled);
        assert_eq!(config.max_history_size, 1000);
        assert_eq!(config.severity_filter, EventSeverity::Info);
    }

    #[test]
    fn test_severity_by_kind() {
        let started = CoordinationEvent::now(None, "log", CoordinationEventKind::InstanceStarted);
        assert_eq!(started.severity(), EventSeverity::Info);

        let crash = CoordinationEvent::now(
            None,
            "log",
            CoordinationEventKind::InstanceTerminated {
                reason: ExitReason::other("boom"),
            },
        );
        assert_eq!(crash.severity(), EventSeverity::Error);

        let clean = CoordinationEvent::now(
            None,
            "log",
            CoordinationEventKind::InstanceTerminated {
                reason: ExitReason::Shutdown,
            },
        );
        assert_eq!(clean.severity(), EventSeverity::Info);
    }

    #[test]
    fn test_event_serializes_with_tag() {
        let event = CoordinationEvent::now(
            Some("main".into()),
            "log",
            CoordinationEventKind::StopRefused {
                needed_by: "loop".into(),
            },
        );
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"StopRefused\""));
        assert!(json.contains("loop"));
    }
}
