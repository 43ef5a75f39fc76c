//! Service specifications and normalization.
//!
//! A [`ServiceSpec`] is the canonical, hashable description of how to start
//! one service instance. It is the key used by the registry, the resolver and
//! the coordinator throughout the crate. Callers hand in one of the three
//! accepted input shapes ([`SpecInput`]) and [`normalize`] produces the
//! canonical form, filling in defaults so that two inputs that would start
//! the same way compare equal.

// Module declarations
pub mod error;
pub mod normalize;
pub mod traits;
pub mod types;

// Re-exports for convenient access
pub use error::SpecError;
pub use normalize::{normalize, SpecInput};
pub use traits::Service;
pub use types::{RestartPolicy, ServiceId, ServiceSpec, StartArg, StartSpec};
