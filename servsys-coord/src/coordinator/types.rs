//! Public result types of coordinator operations.

// Layer 2: Third-party crate imports
use serde::Serialize;

// Layer 3: Internal module imports
use crate::supervisor::InstanceHandle;

/// Result of a successful `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// At least one spawn was issued; carries the handle of the last spec
    /// started in dependency order
    Started(InstanceHandle),

    /// Every spec in the dependency order was already running; no spawn
    /// was issued
    AlreadyRunning,
}

impl StartOutcome {
    /// Handle of the last-started instance, if any spawn happened.
    pub fn handle(&self) -> Option<InstanceHandle> {
        match self {
            Self::Started(handle) => Some(*handle),
            Self::AlreadyRunning => None,
        }
    }
}

/// Externally visible lifecycle state of a spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ServiceStatus {
    /// No instance is tracked for the spec
    Stopped,

    /// An instance is tracked and alive
    Running,

    /// An instance is tracked but winding down
    Exiting,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_start_outcome_handle() {
        let handle = InstanceHandle::new();
        assert_eq!(StartOutcome::Started(handle).handle(), Some(handle));
        assert_eq!(StartOutcome::AlreadyRunning.handle(), None);
    }
}
