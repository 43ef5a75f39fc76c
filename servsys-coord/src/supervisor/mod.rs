//! The external supervisor contract.
//!
//! The coordinator never spawns or kills workers itself: it delegates to an
//! external supervisor through the [`Supervise`] trait and observes
//! terminations through watch tokens. This module defines that contract,
//! the opaque handle and token types, and [`InProcessSupervisor`], an
//! in-memory reference implementation used by the integration tests and
//! suitable for embedding.

// Module declarations
pub mod error;
pub mod in_process;
pub mod traits;
pub mod types;

// Re-exports for convenient access
pub use error::SuperviseError;
pub use in_process::{InProcessSupervisor, SpawnDirective};
pub use traits::Supervise;
pub use types::{
    ExitReason, InstanceHandle, Liveness, Spawn, Termination, WatchSink, WatchToken,
};
