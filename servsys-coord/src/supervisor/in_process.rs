//! In-memory reference supervisor.

// Layer 1: Standard library imports
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use dashmap::DashMap;

// Layer 3: Internal module imports
use super::error::SuperviseError;
use super::traits::Supervise;
use super::types::{ExitReason, InstanceHandle, Liveness, Spawn, Termination, WatchSink, WatchToken};
use crate::spec::{ServiceId, ServiceSpec};

/// How the in-process supervisor should answer a spawn for a service id.
#[derive(Debug, Clone)]
pub enum SpawnDirective {
    /// Refuse with an error carrying the given reason
    Deny(String),

    /// Decline without error
    Ignore,
}

/// Bookkeeping for one in-process instance.
#[derive(Debug)]
struct InstanceCell {
    spec_id: ServiceId,
    liveness: Liveness,
    watchers: Vec<(WatchToken, WatchSink)>,
}

#[derive(Debug, Default)]
struct Inner {
    instances: DashMap<InstanceHandle, InstanceCell>,
    directives: DashMap<ServiceId, SpawnDirective>,
    spawned_total: AtomicUsize,
    terminated_total: AtomicUsize,
}

/// In-memory supervisor that tracks instance lifecycles without running
/// real workers.
///
/// Spawning registers a live instance cell; terminating (or externally
/// killing) removes it and fires every watch installed on it. The worker
/// bodies themselves are out of scope; this implementation exists so the
/// coordinator can be exercised end to end, and doubles as a template for
/// binding a real process supervisor.
///
/// Cheap to clone; all clones share state.
///
/// # Examples
///
/// ```rust
/// use servsys_coord::supervisor::{InProcessSupervisor, Supervise, Spawn};
/// use servsys_coord::spec::{Service, ServiceSpec};
///
/// struct Log;
/// impl Service for Log {
///     fn name(&self) -> &'static str {
///         "log"
///     }
/// }
///
/// # tokio_test::block_on(async {
/// let supervisor = InProcessSupervisor::new();
/// let spawn = supervisor.spawn(&ServiceSpec::new(Log)).await.unwrap();
/// assert!(matches!(spawn, Spawn::Started(_)));
/// assert_eq!(supervisor.running_count(), 1);
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct InProcessSupervisor {
    inner: Arc<Inner>,
}

impl InProcessSupervisor {
    /// Creates an empty supervisor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures how spawns for `id` are answered from now on.
    pub fn set_directive(&self, id: impl Into<ServiceId>, directive: SpawnDirective) {
        self.inner.directives.insert(id.into(), directive);
    }

    /// Removes any spawn directive for `id`.
    pub fn clear_directive(&self, id: &ServiceId) {
        self.inner.directives.remove(id);
    }

    /// Kills an instance from the outside, firing its watches with the
    /// given reason. Models a worker crashing or being killed by the OS.
    ///
    /// # Errors
    ///
    /// Returns [`SuperviseError::InstanceNotFound`] for unknown handles.
    pub fn kill(&self, handle: &InstanceHandle, reason: ExitReason) -> Result<(), SuperviseError> {
        self.finish(handle, reason)
    }

    /// Marks an instance as winding down without terminating it, modeling
    /// the window in which a stop has been requested but the worker has not
    /// yet exited.
    pub fn begin_shutdown(&self, handle: &InstanceHandle) {
        if let Some(mut cell) = self.inner.instances.get_mut(handle) {
            cell.liveness = Liveness::WindingDown;
        }
    }

    /// Number of currently live instances.
    pub fn running_count(&self) -> usize {
        self.inner.instances.len()
    }

    /// Total spawns answered with a started instance.
    pub fn spawned_total(&self) -> usize {
        self.inner.spawned_total.load(Ordering::Relaxed)
    }

    /// Total instances that have exited, whether terminated or killed.
    pub fn terminated_total(&self) -> usize {
        self.inner.terminated_total.load(Ordering::Relaxed)
    }

    /// Spec id recorded for a live instance.
    pub fn spec_id_of(&self, handle: &InstanceHandle) -> Option<ServiceId> {
        self.inner
            .instances
            .get(handle)
            .map(|cell| cell.spec_id.clone())
    }

    fn finish(&self, handle: &InstanceHandle, reason: ExitReason) -> Result<(), SuperviseError> {
        let (_, cell) = self
            .inner
            .instances
            .remove(handle)
            .ok_or(SuperviseError::InstanceNotFound { handle: *handle })?;

        self.inner.terminated_total.fetch_add(1, Ordering::Relaxed);

        for (token, sink) in cell.watchers {
            // A closed sink means the watcher is gone; nothing to deliver.
            let _ = sink.send(Termination {
                token,
                reason: reason.clone(),
            });
        }

        Ok(())
    }
}

#[async_trait]
impl Supervise for InProcessSupervisor {
    async fn spawn(&self, spec: &ServiceSpec) -> Result<Spawn, SuperviseError> {
        if let Some(directive) = self.inner.directives.get(spec.id()) {
            match directive.value() {
                SpawnDirective::Deny(reason) => {
                    return Err(SuperviseError::spawn_rejected(
                        spec.id().clone(),
                        reason.as_str(),
                    ));
                }
                SpawnDirective::Ignore => return Ok(Spawn::Ignored),
            }
        }

        let handle = InstanceHandle::new();
        self.inner.instances.insert(
            handle,
            InstanceCell {
                spec_id: spec.id().clone(),
                liveness: Liveness::Alive,
                watchers: Vec::new(),
            },
        );
        self.inner.spawned_total.fetch_add(1, Ordering::Relaxed);

        Ok(Spawn::Started(handle))
    }

    async fn terminate(
        &self,
        handle: &InstanceHandle,
        reason: ExitReason,
    ) -> Result<(), SuperviseError> {
        self.finish(handle, reason)
    }

    fn watch(&self, handle: &InstanceHandle, sink: WatchSink) -> WatchToken {
        let token = WatchToken::new();
        match self.inner.instances.get_mut(handle) {
            Some(mut cell) => cell.watchers.push((token, sink)),
            None => {
                // Watching an already-gone instance notifies immediately.
                let _ = sink.send(Termination {
                    token,
                    reason: ExitReason::Normal,
                });
            }
        }
        token
    }

    async fn probe(&self, handle: &InstanceHandle) -> Liveness {
        self.inner
            .instances
            .get(handle)
            .map(|cell| cell.liveness)
            .unwrap_or(Liveness::Gone)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::spec::Service;
    use tokio::sync::mpsc::unbounded_channel;

    struct Alpha;

    impl Service for Alpha {
        fn name(&self) -> &'static str {
            "alpha"
        }
    }

    fn spec() -> ServiceSpec {
        ServiceSpec::new(Alpha)
    }

    async fn spawn_handle(supervisor: &InProcessSupervisor) -> InstanceHandle {
        match supervisor.spawn(&spec()).await.unwrap() {
            Spawn::Started(handle) => handle,
            Spawn::Ignored => panic!("expected a started instance"),
        }
    }

    #[tokio::test]
    async fn test_spawn_and_probe() {
        let supervisor = InProcessSupervisor::new();
        let handle = spawn_handle(&supervisor).await;

        assert_eq!(supervisor.probe(&handle).await, Liveness::Alive);
        assert_eq!(supervisor.running_count(), 1);
        assert_eq!(supervisor.spawned_total(), 1);
        assert_eq!(supervisor.spec_id_of(&handle), Some(ServiceId::from("alpha")));
    }

    #[tokio::test]
    async fn test_terminate_fires_watch() {
        let supervisor = InProcessSupervisor::new();
        let handle = spawn_handle(&supervisor).await;

        let (sink, mut events) = unbounded_channel();
        let token = supervisor.watch(&handle, sink);

        supervisor
            .terminate(&handle, ExitReason::Shutdown)
            .await
            .unwrap();

        let event = events.recv().await.unwrap();
        assert_eq!(event.token, token);
        assert_eq!(event.reason, ExitReason::Shutdown);
        assert_eq!(supervisor.probe(&handle).await, Liveness::Gone);
        assert_eq!(supervisor.terminated_total(), 1);
    }

    #[tokio::test]
    async fn test_kill_propagates_reason() {
        let supervisor = InProcessSupervisor::new();
        let handle = spawn_handle(&supervisor).await;

        let (sink, mut events) = unbounded_channel();
        supervisor.watch(&handle, sink);

        supervisor.kill(&handle, ExitReason::other("boom")).unwrap();

        let event = events.recv().await.unwrap();
        assert!(event.reason.is_abnormal());
    }

    #[tokio::test]
    async fn test_terminate_unknown_handle() {
        let supervisor = InProcessSupervisor::new();
        let result = supervisor
            .terminate(&InstanceHandle::new(), ExitReason::Shutdown)
            .await;
        assert!(matches!(
            result,
            Err(SuperviseError::InstanceNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_deny_directive() {
        let supervisor = InProcessSupervisor::new();
        supervisor.set_directive("alpha", SpawnDirective::Deny("quota".into()));

        let result = supervisor.spawn(&spec()).await;
        assert!(matches!(result, Err(SuperviseError::SpawnRejected { .. })));

        supervisor.clear_directive(&ServiceId::from("alpha"));
        assert!(supervisor.spawn(&spec()).await.is_ok());
    }

    #[tokio::test]
    async fn test_ignore_directive() {
        let supervisor = InProcessSupervisor::new();
        supervisor.set_directive("alpha", SpawnDirective::Ignore);

        let spawn = supervisor.spawn(&spec()).await.unwrap();
        assert_eq!(spawn, Spawn::Ignored);
        assert_eq!(supervisor.running_count(), 0);
    }

    #[tokio::test]
    async fn test_begin_shutdown_reports_winding_down() {
        let supervisor = InProcessSupervisor::new();
        let handle = spawn_handle(&supervisor).await;

        supervisor.begin_shutdown(&handle);
        assert_eq!(supervisor.probe(&handle).await, Liveness::WindingDown);

        supervisor
            .terminate(&handle, ExitReason::Shutdown)
            .await
            .unwrap();
        assert_eq!(supervisor.probe(&handle).await, Liveness::Gone);
    }

    #[tokio::test]
    async fn test_watch_on_gone_instance_notifies_immediately() {
        let supervisor = InProcessSupervisor::new();
        let (sink, mut events) = unbounded_channel();
        let token = supervisor.watch(&InstanceHandle::new(), sink);

        let event = events.recv().await.unwrap();
        assert_eq!(event.token, token);
        assert_eq!(event.reason, ExitReason::Normal);
    }
}
