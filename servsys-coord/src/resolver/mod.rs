//! Dependency resolution over the service graph.
//!
//! The resolver turns the needs declared by services into start and stop
//! orderings. It never materializes the graph: edges are discovered on
//! demand by asking each spec's service for its needs, so ownership stays
//! acyclic even when the declared graph is not. Cyclic graphs are detected
//! during traversal and rejected.
//!
//! All operations are pure with respect to the outside world.

// Module declarations
pub mod error;
pub mod traversal;

// Re-exports for convenient access
pub use error::ResolveError;
pub use traversal::{dependencies, dependents, direct_needed_by, direct_needs};
