//! Prelude module for convenient imports.
//!
//! Re-exports the working set for building coordinated service graphs:
//!
//! ```rust
//! use servsys_coord::prelude::*;
//! ```

// Specs
pub use crate::spec::{
    normalize, RestartPolicy, Service, ServiceId, ServiceSpec, SpecError, SpecInput, StartArg,
};

// Resolver
pub use crate::resolver::{dependencies, dependents, ResolveError};

// Coordination
pub use crate::coordinator::{
    CoordinatorBuilder, CoordinatorConfig, CoordinatorError, CoordinatorHandle, QueryError,
    ServiceStatus, StartError, StartOutcome, StopError,
};

// Supervisor contract
pub use crate::supervisor::{
    ExitReason, InProcessSupervisor, InstanceHandle, Liveness, Spawn, Supervise, SuperviseError,
    Termination, WatchToken,
};

// Monitoring
pub use crate::monitoring::{
    CoordinationEvent, EventSeverity, InMemoryMonitor, Monitor, MonitoringConfig, NoopMonitor,
};
