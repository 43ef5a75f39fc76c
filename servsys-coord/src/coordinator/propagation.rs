//! Decisions taken when a termination is observed.

// Layer 3: Internal module imports
use super::config::CoordinatorConfig;
use crate::spec::RestartPolicy;
use crate::supervisor::ExitReason;

/// Pure decision half of the failure-propagation pipeline.
///
/// Derived from the coordinator configuration once at construction; the
/// coordinator core consults it for every processed termination. Cascade
/// terminations propagate the original exit reason as the cause, so a
/// cascade-stopped dependent observes the same abnormality in its own
/// termination event and restarts itself when restarts are enabled.
#[derive(Debug, Clone, Copy)]
pub struct PropagationPolicy {
    stop_dependents: bool,
    restart_dependents: bool,
}

impl PropagationPolicy {
    /// Derives the policy from a configuration.
    pub fn from_config(config: &CoordinatorConfig) -> Self {
        Self {
            stop_dependents: config.stop_dependents,
            restart_dependents: config.restart_dependents,
        }
    }

    /// Whether terminations cascade to running dependents.
    pub fn cascades(&self) -> bool {
        self.stop_dependents
    }

    /// Whether the terminated spec should be started again.
    ///
    /// Requires all three: restarts enabled, an abnormal exit reason, and a
    /// per-spec restart policy that allows it (`Temporary` never restarts).
    pub fn should_restart(&self, reason: &ExitReason, policy: RestartPolicy) -> bool {
        self.restart_dependents && reason.is_abnormal() && policy.should_restart(true)
    }
}
