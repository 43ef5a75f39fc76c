//! Fluent construction of coordinators.

// Layer 2: Third-party crate imports
use tokio::sync::mpsc::unbounded_channel;

// Layer 3: Internal module imports
use super::config::CoordinatorConfig;
use super::core::Coordinator;
use super::error::CoordinatorError;
use super::handle::{self, CoordinatorHandle};
use crate::monitoring::{CoordinationEvent, Monitor, NoopMonitor};
use crate::supervisor::Supervise;

/// Builder for a coordinator.
///
/// The external supervisor is the one required ingredient; finishing the
/// builder without it fails with [`CoordinatorError::NoSupervisor`]. The
/// monitor defaults to [`NoopMonitor`].
///
/// # Examples
///
/// ```rust
/// use servsys_coord::coordinator::CoordinatorBuilder;
/// use servsys_coord::supervisor::InProcessSupervisor;
///
/// # tokio_test::block_on(async {
/// let coordinator = CoordinatorBuilder::new()
///     .with_supervisor(InProcessSupervisor::new())
///     .stop_dependents(true)
///     .restart_dependents(true)
///     .spawn()
///     .unwrap();
/// # drop(coordinator);
/// # });
/// ```
#[derive(Debug)]
pub struct CoordinatorBuilder<S, M = NoopMonitor<CoordinationEvent>> {
    supervisor: Option<S>,
    monitor: M,
    config: CoordinatorConfig,
}

impl<S> CoordinatorBuilder<S> {
    /// Creates a builder with default configuration and no supervisor.
    pub fn new() -> Self {
        Self {
            supervisor: None,
            monitor: NoopMonitor::new(),
            config: CoordinatorConfig::default(),
        }
    }
}

impl<S> Default for CoordinatorBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, M> CoordinatorBuilder<S, M> {
    /// Sets the external supervisor to delegate spawns and terminations to.
    pub fn with_supervisor(mut self, supervisor: S) -> Self {
        self.supervisor = Some(supervisor);
        self
    }

    /// Replaces the monitor.
    pub fn with_monitor<M2: Monitor<CoordinationEvent>>(
        self,
        monitor: M2,
    ) -> CoordinatorBuilder<S, M2> {
        CoordinatorBuilder {
            supervisor: self.supervisor,
            monitor,
            config: self.config,
        }
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, config: CoordinatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Cascade-stop transitive dependents on any termination.
    pub fn stop_dependents(mut self, enabled: bool) -> Self {
        self.config.stop_dependents = enabled;
        self
    }

    /// Restart the terminated spec after an abnormal termination.
    pub fn restart_dependents(mut self, enabled: bool) -> Self {
        self.config.restart_dependents = enabled;
        self
    }

    /// Registers the coordinator under a logical name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.config.name = Some(name.into());
        self
    }

    /// Finishes the builder and spawns the coordinator task.
    ///
    /// Must be called within a Tokio runtime. The coordinator runs until
    /// every handle to it has been dropped.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinatorError::NoSupervisor`] when no supervisor was
    /// configured.
    pub fn spawn(self) -> Result<CoordinatorHandle, CoordinatorError>
    where
        S: Supervise,
        M: Monitor<CoordinationEvent> + 'static,
    {
        let supervisor = self.supervisor.ok_or(CoordinatorError::NoSupervisor)?;

        let (requests_tx, requests_rx) = unbounded_channel();
        let (watch_tx, watch_rx) = unbounded_channel();

        let coordinator_handle = CoordinatorHandle::new(requests_tx);
        if let Some(name) = &self.config.name {
            handle::register(name, coordinator_handle.clone());
        }

        let coordinator = Coordinator::new(
            supervisor,
            self.monitor,
            self.config,
            requests_rx,
            watch_rx,
            watch_tx,
        );
        tokio::spawn(coordinator.run());

        Ok(coordinator_handle)
    }
}
