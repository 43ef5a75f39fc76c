//! Error types for dependency resolution.

// Layer 2: Third-party crate imports
use thiserror::Error;

// Layer 3: Internal module imports
use crate::spec::{ServiceId, SpecError};

/// Errors that can occur while resolving the dependency graph.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// The traversed subgraph contains a cycle.
    #[error("cyclic dependency detected at '{id}'")]
    CyclicDependency {
        /// The spec at which the cycle was observed
        id: ServiceId,
    },

    /// A declared need did not normalize into a usable spec.
    #[error(transparent)]
    Spec(#[from] SpecError),
}

impl ResolveError {
    /// Creates a new cycle error.
    pub fn cyclic(id: ServiceId) -> Self {
        Self::CyclicDependency { id }
    }

    /// Returns `true` if this error reports a dependency cycle.
    pub fn is_cyclic(&self) -> bool {
        matches!(self, Self::CyclicDependency { .. })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cyclic_error_message() {
        let err = ResolveError::cyclic(ServiceId::from("f"));
        assert!(err.is_cyclic());
        assert!(err.to_string().contains("'f'"));
    }

    #[test]
    fn test_spec_error_passthrough() {
        let err = ResolveError::from(SpecError::bad_spec("blank"));
        assert!(!err.is_cyclic());
        assert!(err.to_string().contains("blank"));
    }
}
