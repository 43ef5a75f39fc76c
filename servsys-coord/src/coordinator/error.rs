//! Error types for coordinator operations.

// Layer 2: Third-party crate imports
use thiserror::Error;

// Layer 3: Internal module imports
use crate::resolver::ResolveError;
use crate::spec::{ServiceId, SpecError};
use crate::supervisor::SuperviseError;

/// Errors raised while constructing or reaching a coordinator.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoordinatorError {
    /// The builder was finished without an external supervisor.
    #[error("no supervisor configured")]
    NoSupervisor,
}

/// Errors returned by `start`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StartError {
    /// The dependency graph reachable from the spec contains a cycle.
    #[error("cyclic dependency detected at '{id}'")]
    Cyclic {
        /// The spec at which the cycle was observed
        id: ServiceId,
    },

    /// The input did not normalize into a usable spec.
    #[error(transparent)]
    Spec(#[from] SpecError),

    /// The external supervisor failed a spawn; prerequisites already
    /// started remain running.
    #[error(transparent)]
    Supervise(#[from] SuperviseError),

    /// The coordinator task is no longer running.
    #[error("coordinator is no longer running")]
    Closed,
}

impl StartError {
    /// Returns `true` if this error reports a dependency cycle.
    pub fn is_cyclic(&self) -> bool {
        matches!(self, Self::Cyclic { .. })
    }
}

impl From<ResolveError> for StartError {
    fn from(err: ResolveError) -> Self {
        match err {
            ResolveError::CyclicDependency { id } => Self::Cyclic { id },
            ResolveError::Spec(err) => Self::Spec(err),
        }
    }
}

/// Errors returned by `stop`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StopError {
    /// The spec is not currently running.
    #[error("service is not running")]
    NotFound,

    /// Another running spec still needs this one.
    ///
    /// Some callers historically know this condition as `cannot_stop`;
    /// the coordinator always reports it as `Needed`.
    #[error("service is still needed by running dependent '{needed_by}'")]
    Needed {
        /// Spec id of a running dependent
        needed_by: ServiceId,
    },

    /// The input did not normalize into a usable spec.
    #[error(transparent)]
    Spec(#[from] SpecError),

    /// The external supervisor failed the termination.
    #[error(transparent)]
    Supervise(#[from] SuperviseError),

    /// The coordinator task is no longer running.
    #[error("coordinator is no longer running")]
    Closed,
}

impl StopError {
    /// Returns `true` if the stop was refused because the spec is needed.
    pub fn is_needed(&self) -> bool {
        matches!(self, Self::Needed { .. })
    }

    /// Returns `true` if the spec was not running.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

/// Errors returned by the query operations (`can_stop`, `lookup`,
/// `status`).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QueryError {
    /// The input did not normalize into a usable spec.
    #[error(transparent)]
    Spec(#[from] SpecError),

    /// The coordinator task is no longer running.
    #[error("coordinator is no longer running")]
    Closed,
}
