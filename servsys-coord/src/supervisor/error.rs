//! Error types for supervisor operations.

// Layer 2: Third-party crate imports
use thiserror::Error;

// Layer 3: Internal module imports
use super::types::InstanceHandle;
use crate::spec::ServiceId;

/// Errors surfaced by an external supervisor.
///
/// These are returned verbatim as the reply of the coordinator request that
/// triggered the call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SuperviseError {
    /// No instance is known under the given handle.
    #[error("no instance under handle {handle}")]
    InstanceNotFound {
        /// The unrecognized handle
        handle: InstanceHandle,
    },

    /// The supervisor refused to start the worker.
    #[error("supervisor refused to spawn '{id}': {reason}")]
    SpawnRejected {
        /// Spec id of the refused service
        id: ServiceId,
        /// Supervisor-provided reason
        reason: String,
    },
}

impl SuperviseError {
    /// Creates a spawn-rejection error.
    pub fn spawn_rejected(id: ServiceId, reason: impl Into<String>) -> Self {
        Self::SpawnRejected {
            id,
            reason: reason.into(),
        }
    }

    /// Returns `true` if this error reports an unknown handle.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::InstanceNotFound { .. })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_not_found() {
        let handle = InstanceHandle::new();
        let err = SuperviseError::InstanceNotFound { handle };
        assert!(err.is_not_found());
        assert!(err.to_string().contains(&handle.to_string()));
    }

    #[test]
    fn test_spawn_rejected_message() {
        let err = SuperviseError::spawn_rejected(ServiceId::from("log"), "quota exceeded");
        assert!(!err.is_not_found());
        assert!(err.to_string().contains("log"));
        assert!(err.to_string().contains("quota exceeded"));
    }
}
