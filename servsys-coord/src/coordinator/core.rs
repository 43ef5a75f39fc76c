//! The coordinator task: one loop over requests and termination events.

// Layer 2: Third-party crate imports
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::oneshot;

// Layer 3: Internal module imports
use super::config::CoordinatorConfig;
use super::error::{QueryError, StartError, StopError};
use super::handle;
use super::propagation::PropagationPolicy;
use super::types::{ServiceStatus, StartOutcome};
use crate::monitoring::{CoordinationEvent, CoordinationEventKind, Monitor};
use crate::registry::Registry;
use crate::resolver;
use crate::spec::{normalize, ServiceSpec, SpecInput};
use crate::supervisor::{
    ExitReason, InstanceHandle, Liveness, Spawn, Supervise, Termination, WatchSink,
};

/// A request submitted through a [`CoordinatorHandle`](super::CoordinatorHandle).
pub(crate) enum Request {
    Start {
        input: SpecInput,
        reply: oneshot::Sender<Result<StartOutcome, StartError>>,
    },
    Stop {
        input: SpecInput,
        reply: oneshot::Sender<Result<(), StopError>>,
    },
    CanStop {
        input: SpecInput,
        reply: oneshot::Sender<Result<bool, QueryError>>,
    },
    Lookup {
        input: SpecInput,
        reply: oneshot::Sender<Result<Option<InstanceHandle>, QueryError>>,
    },
    Status {
        input: SpecInput,
        reply: oneshot::Sender<Result<ServiceStatus, QueryError>>,
    },
}

/// The state machine behind a coordinator.
///
/// Owns the registry and is its sole mutator. Driven by
/// [`CoordinatorBuilder::spawn`](super::CoordinatorBuilder::spawn), which
/// moves it onto its own task; everything externally visible goes through
/// the request channel.
pub(crate) struct Coordinator<S, M> {
    supervisor: S,
    monitor: M,
    config: CoordinatorConfig,
    policy: PropagationPolicy,
    registry: Registry,
    requests: UnboundedReceiver<Request>,
    terminations: UnboundedReceiver<Termination>,
    // Cloned into every watch call; also keeps the termination channel open.
    watch_sink: WatchSink,
}

impl<S, M> Coordinator<S, M>
where
    S: Supervise,
    M: Monitor<CoordinationEvent>,
{
    pub(crate) fn new(
        supervisor: S,
        monitor: M,
        config: CoordinatorConfig,
        requests: UnboundedReceiver<Request>,
        terminations: UnboundedReceiver<Termination>,
        watch_sink: WatchSink,
    ) -> Self {
        let policy = PropagationPolicy::from_config(&config);
        Self {
            supervisor,
            monitor,
            config,
            policy,
            registry: Registry::new(),
            requests,
            terminations,
            watch_sink,
        }
    }

    /// Drains requests and termination events until every handle is gone.
    ///
    /// Termination events are drained first so state reconciliation (and
    /// any cascade it causes) completes before the next request is
    /// answered.
    pub(crate) async fn run(mut self) {
        loop {
            tokio::select! {
                biased;
                Some(event) = self.terminations.recv() => {
                    self.on_termination(event).await;
                }
                request = self.requests.recv() => {
                    match request {
                        Some(request) => self.on_request(request).await,
                        None => break,
                    }
                }
            }
        }

        if let Some(name) = &self.config.name {
            handle::deregister(name);
        }
    }

    async fn on_request(&mut self, request: Request) {
        match request {
            Request::Start { input, reply } => {
                let result = match normalize(input) {
                    Ok(spec) => self.do_start(spec).await,
                    Err(err) => Err(err.into()),
                };
                let _ = reply.send(result);
            }
            Request::Stop { input, reply } => {
                let result = match normalize(input) {
                    Ok(spec) => self.do_stop(&spec).await,
                    Err(err) => Err(err.into()),
                };
                let _ = reply.send(result);
            }
            Request::CanStop { input, reply } => {
                let result = match normalize(input) {
                    Ok(spec) => self.can_stop(&spec),
                    Err(err) => Err(err.into()),
                };
                let _ = reply.send(result);
            }
            Request::Lookup { input, reply } => {
                let result = normalize(input)
                    .map(|spec| self.registry.handle_of(&spec))
                    .map_err(QueryError::from);
                let _ = reply.send(result);
            }
            Request::Status { input, reply } => {
                let result = match normalize(input) {
                    Ok(spec) => Ok(self.status_of(&spec).await),
                    Err(err) => Err(err.into()),
                };
                let _ = reply.send(result);
            }
        }
    }

    /// Starts `spec` after everything it needs, in dependency order.
    ///
    /// Specs already running are skipped. The first supervisor error halts
    /// the sequence and is returned; prerequisites started so far remain
    /// running; they are legitimately needed and other callers may already
    /// depend on them.
    async fn do_start(&mut self, spec: ServiceSpec) -> Result<StartOutcome, StartError> {
        let order = resolver::dependencies(&spec)?;

        let mut last = None;
        for dep in order {
            if self.registry.contains(&dep) {
                continue;
            }
            match self.supervisor.spawn(&dep).await? {
                Spawn::Started(handle) => {
                    let token = self.supervisor.watch(&handle, self.watch_sink.clone());
                    self.record(&dep, CoordinationEventKind::InstanceStarted).await;
                    self.registry.insert(dep, handle, token);
                    last = Some(handle);
                }
                Spawn::Ignored => {
                    self.record(&dep, CoordinationEventKind::SpawnDeclined).await;
                }
            }
        }

        Ok(match last {
            Some(handle) => StartOutcome::Started(handle),
            None => StartOutcome::AlreadyRunning,
        })
    }

    /// Delegates termination of `spec` unless something still needs it.
    ///
    /// The registry entry stays until the termination notification is
    /// processed, so the spec keeps reading as tracked while the worker
    /// winds down.
    async fn do_stop(&mut self, spec: &ServiceSpec) -> Result<(), StopError> {
        let Some(handle) = self.registry.handle_of(spec) else {
            return Err(StopError::NotFound);
        };

        let universe = self.registry.specs();
        let needed_by = resolver::direct_needed_by(spec, &universe)?;
        if let Some(dependent) = needed_by.into_iter().find(|d| d != spec) {
            self.record(
                spec,
                CoordinationEventKind::StopRefused {
                    needed_by: dependent.id().to_string(),
                },
            )
            .await;
            return Err(StopError::Needed {
                needed_by: dependent.id().clone(),
            });
        }

        self.supervisor
            .terminate(&handle, ExitReason::Shutdown)
            .await?;
        self.record(spec, CoordinationEventKind::StopRequested).await;

        Ok(())
    }

    /// True iff `spec` is running and no other running spec needs it.
    fn can_stop(&self, spec: &ServiceSpec) -> Result<bool, QueryError> {
        if !self.registry.contains(spec) {
            return Ok(false);
        }
        let universe = self.registry.specs();
        let needed_by = resolver::direct_needed_by(spec, &universe)?;
        Ok(!needed_by.iter().any(|d| d != spec))
    }

    async fn status_of(&self, spec: &ServiceSpec) -> ServiceStatus {
        match self.registry.handle_of(spec) {
            None => ServiceStatus::Stopped,
            Some(handle) => match self.supervisor.probe(&handle).await {
                Liveness::Alive => ServiceStatus::Running,
                Liveness::WindingDown => ServiceStatus::Exiting,
                // Registry not yet reconciled; the pending termination
                // event will remove the entry.
                Liveness::Gone => ServiceStatus::Stopped,
            },
        }
    }

    /// Processes one termination notification.
    ///
    /// Order matters: the token entry is popped first, dependents are
    /// resolved while the spec is still in the running set, the spec entry
    /// goes last, and only then is a restart considered.
    async fn on_termination(&mut self, event: Termination) {
        let Some(spec) = self.registry.remove_by_token(&event.token) else {
            return;
        };

        self.record(
            &spec,
            CoordinationEventKind::InstanceTerminated {
                reason: event.reason.clone(),
            },
        )
        .await;

        if self.policy.cascades() {
            self.cascade(&spec, &event.reason).await;
        }

        self.registry.remove_by_spec(&spec);

        if self.policy.should_restart(&event.reason, spec.restart()) {
            match self.do_start(spec.clone()).await {
                Ok(_) => {
                    self.record(&spec, CoordinationEventKind::InstanceRestarted)
                        .await;
                }
                Err(err) => {
                    self.record(
                        &spec,
                        CoordinationEventKind::RestartFailed {
                            error: err.to_string(),
                        },
                    )
                    .await;
                }
            }
        }
    }

    /// Terminates every running transitive dependent of `spec`, deepest
    /// first, propagating the original exit reason as the cause.
    async fn cascade(&mut self, spec: &ServiceSpec, reason: &ExitReason) {
        let universe = self.registry.specs();
        let order = match resolver::dependents(spec, &universe) {
            Ok(order) => order,
            Err(err) => {
                // A graph accepted by start cannot normally turn cyclic;
                // abort the cascade for this spec only.
                self.record(
                    spec,
                    CoordinationEventKind::CascadeAborted {
                        error: err.to_string(),
                    },
                )
                .await;
                return;
            }
        };

        for dependent in order.into_iter().filter(|d| d != spec) {
            let Some(handle) = self.registry.handle_of(&dependent) else {
                continue;
            };
            // An already-gone instance is fine; its own termination event
            // reconciles the registry.
            if self
                .supervisor
                .terminate(&handle, reason.clone())
                .await
                .is_ok()
            {
                self.record(
                    spec,
                    CoordinationEventKind::CascadeStop {
                        dependent: dependent.id().to_string(),
                    },
                )
                .await;
            }
        }
    }

    async fn record(&self, spec: &ServiceSpec, kind: CoordinationEventKind) {
        let event = CoordinationEvent::now(self.config.name.clone(), spec.id().as_str(), kind);
        // Monitoring must never disturb coordination.
        let _ = self.monitor.record(event).await;
    }
}
