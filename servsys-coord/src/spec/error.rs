//! Error types for spec normalization.

// Layer 2: Third-party crate imports
use thiserror::Error;

/// Errors that can occur while normalizing a service reference.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SpecError {
    /// The input does not describe a startable service.
    #[error("bad service spec: {reason}")]
    BadSpec {
        /// What made the input unusable
        reason: String,
    },
}

impl SpecError {
    /// Creates a new bad-spec error.
    pub fn bad_spec(reason: impl Into<String>) -> Self {
        Self::BadSpec {
            reason: reason.into(),
        }
    }
}
