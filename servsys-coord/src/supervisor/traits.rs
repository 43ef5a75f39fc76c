//! The trait an external supervisor implements for the coordinator.

// Layer 2: Third-party crate imports
use async_trait::async_trait;

// Layer 3: Internal module imports
use super::error::SuperviseError;
use super::types::{ExitReason, InstanceHandle, Liveness, Spawn, WatchSink, WatchToken};
use crate::spec::ServiceSpec;

/// External supervisor delegated to for spawning and terminating workers.
///
/// The coordinator calls this contract at its three suspension points:
/// spawning during `start`, terminating during `stop` and cascade stops,
/// and probing during `status`. Implementations own the worker lifetimes;
/// the coordinator only holds handles.
///
/// # Termination notifications
///
/// [`watch`](Supervise::watch) subscribes a one-shot notification for an
/// instance: when the worker exits, the supervisor sends a
/// [`Termination`](super::Termination) carrying the returned token and the
/// exit reason into the provided sink. The coordinator installs exactly one
/// watch per instance it records.
#[async_trait]
pub trait Supervise: Send + Sync + 'static {
    /// Starts a worker for the given spec.
    ///
    /// Returning [`Spawn::Ignored`] declines without error: the coordinator
    /// records nothing and proceeds with the rest of the start sequence.
    ///
    /// # Errors
    ///
    /// Returns an error when the worker cannot be started; the coordinator
    /// halts the start sequence and surfaces it verbatim.
    async fn spawn(&self, spec: &ServiceSpec) -> Result<Spawn, SuperviseError>;

    /// Synchronously requests termination of an instance.
    ///
    /// `reason` is the cause to propagate; the matching termination
    /// notification carries it back.
    ///
    /// # Errors
    ///
    /// Returns [`SuperviseError::InstanceNotFound`] when the handle is
    /// unknown (e.g. the worker already exited).
    async fn terminate(
        &self,
        handle: &InstanceHandle,
        reason: ExitReason,
    ) -> Result<(), SuperviseError>;

    /// Subscribes a one-shot termination notification for an instance.
    fn watch(&self, handle: &InstanceHandle, sink: WatchSink) -> WatchToken;

    /// Reports the instance's liveness.
    ///
    /// The default says `Alive`: supervisors without a probe degrade to
    /// "present in the registry reads as running" and rely exclusively on
    /// termination events.
    async fn probe(&self, handle: &InstanceHandle) -> Liveness {
        let _ = handle;
        Liveness::Alive
    }
}
