//! # servsys-coord - Service-Dependency Coordinator
//!
//! Supervisory coordination for long-lived worker services whose lifecycles
//! are constrained by declared inter-service dependencies. Given a service,
//! the coordinator guarantees everything it needs is running first, starts
//! it, tracks the instance, refuses to stop anything a running dependent
//! still needs, and optionally propagates failures along the dependency
//! graph.
//!
//! # Quick Start
//!
//! ```rust
//! use servsys_coord::prelude::*;
//!
//! // 1. Declare services and their needs
//! struct Store;
//! impl Service for Store {
//!     fn name(&self) -> &'static str {
//!         "store"
//!     }
//! }
//!
//! struct Api;
//! impl Service for Api {
//!     fn name(&self) -> &'static str {
//!         "api"
//!     }
//!
//!     fn needs(&self) -> Vec<SpecInput> {
//!         vec![SpecInput::service(Store)]
//!     }
//! }
//!
//! # tokio_test::block_on(async {
//! // 2. Build a coordinator over an external supervisor
//! let coordinator = CoordinatorBuilder::new()
//!     .with_supervisor(InProcessSupervisor::new())
//!     .spawn()
//!     .unwrap();
//!
//! // 3. Starting Api first starts Store
//! coordinator.start(Api).await.unwrap();
//! assert_eq!(coordinator.status(Store).await.unwrap(), ServiceStatus::Running);
//!
//! // 4. Store cannot stop while Api needs it
//! assert!(coordinator.stop(Store).await.unwrap_err().is_needed());
//! # });
//! ```
//!
//! # Architecture
//!
//! Three tightly coupled subsystems make up the core:
//!
//! - The **resolver** ([`resolver`]) computes start and stop orderings over
//!   the needs graph, discovering edges on demand and rejecting cycles.
//! - The **coordinator** ([`coordinator`]) serializes every operation onto
//!   one task that owns the [`registry`] and consumes termination events.
//! - The **failure-propagation policy**
//!   ([`coordinator::propagation`]) decides, per configuration, whether a
//!   termination cascades to dependents and whether the spec restarts.
//!
//! Around them sit the [`spec`] normalizer (canonical hashable service
//! specs), the [`supervisor`] contract (the external process supervisor the
//! coordinator delegates to), and [`monitoring`] (structured coordination
//! events).
//!
//! The actual worker processes, their business logic and the real process
//! supervisor live outside this crate; [`supervisor::InProcessSupervisor`]
//! is an in-memory stand-in for tests and embedding.
//!
//! # Concurrency Model
//!
//! One logical task per coordinator. Requests and termination events are
//! multiplexed into a single loop; replies are sent before the next item is
//! consumed, and a termination's synchronous portion (cascade fan-out and
//! registry removal) completes before anything else runs. The only
//! suspension points are the external supervisor's spawn, terminate and
//! probe calls.

// Module declarations
pub mod coordinator;
pub mod monitoring;
pub mod prelude;
pub mod registry;
pub mod resolver;
pub mod spec;
pub mod supervisor;

// Re-export commonly used types
pub use coordinator::{
    CoordinatorBuilder, CoordinatorConfig, CoordinatorError, CoordinatorHandle, QueryError,
    ServiceStatus, StartError, StartOutcome, StopError,
};
pub use monitoring::{
    CoordinationEvent, CoordinationEventKind, EventSeverity, InMemoryMonitor, Monitor,
    MonitoringConfig, MonitoringError, MonitoringSnapshot, NoopMonitor,
};
pub use registry::{Registry, RunningInstance};
pub use resolver::{dependencies, dependents, direct_needed_by, direct_needs, ResolveError};
pub use spec::{
    normalize, RestartPolicy, Service, ServiceId, ServiceSpec, SpecError, SpecInput, StartArg,
};
pub use supervisor::{
    ExitReason, InProcessSupervisor, InstanceHandle, Liveness, Spawn, SpawnDirective, Supervise,
    SuperviseError, Termination, WatchSink, WatchToken,
};
