//! Error types for monitoring operations.

// Layer 2: Third-party crate imports
use thiserror::Error;

/// Errors that can occur while recording or inspecting events.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MonitoringError {
    /// Monitor configuration is unusable.
    #[error("monitoring configuration error: {message}")]
    Configuration {
        /// What is wrong with the configuration
        message: String,
    },

    /// An event could not be recorded.
    #[error("failed to record event: {message}")]
    Record {
        /// Why recording failed
        message: String,
    },
}

impl MonitoringError {
    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a record error.
    pub fn record(message: impl Into<String>) -> Self {
        Self::Record {
            message: message.into(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert!(MonitoringError::configuration("bad size")
            .to_string()
            .contains("bad size"));
        assert!(MonitoringError::record("sink closed")
            .to_string()
            .contains("sink closed"));
    }
}
