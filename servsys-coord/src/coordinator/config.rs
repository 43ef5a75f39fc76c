//! Coordinator configuration with spec'd defaults.

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};

/// Default cascade-stop setting
pub const DEFAULT_STOP_DEPENDENTS: bool = false;

/// Default restart setting
pub const DEFAULT_RESTART_DEPENDENTS: bool = false;

/// Behavioral options of a coordinator.
///
/// # Examples
///
/// ```rust
/// use servsys_coord::coordinator::CoordinatorConfig;
///
/// let config = CoordinatorConfig::default()
///     .with_stop_dependents(true)
///     .with_name("main");
/// assert!(config.stop_dependents);
/// assert!(!config.restart_dependents);
/// assert_eq!(config.name.as_deref(), Some("main"));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinatorConfig {
    /// On any termination, proactively terminate all currently-running
    /// transitive dependents of the terminated spec
    pub stop_dependents: bool,

    /// On abnormal termination, start the terminated spec again
    pub restart_dependents: bool,

    /// Optional logical name, registered in the process-wide directory for
    /// request routing in multi-instance deployments
    pub name: Option<String>,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            stop_dependents: DEFAULT_STOP_DEPENDENTS,
            restart_dependents: DEFAULT_RESTART_DEPENDENTS,
            name: None,
        }
    }
}

impl CoordinatorConfig {
    /// Sets whether terminations cascade to dependents.
    pub fn with_stop_dependents(mut self, enabled: bool) -> Self {
        self.stop_dependents = enabled;
        self
    }

    /// Sets whether abnormal terminations trigger a restart.
    pub fn with_restart_dependents(mut self, enabled: bool) -> Self {
        self.restart_dependents = enabled;
        self
    }

    /// Sets the logical name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CoordinatorConfig::default();
        assert!(!config.stop_dependents);
        assert!(!config.restart_dependents);
        assert!(config.name.is_none());
    }

    #[test]
    fn test_builder_style_setters() {
        let config = CoordinatorConfig::default()
            .with_stop_dependents(true)
            .with_restart_dependents(true)
            .with_name("main");
        assert!(config.stop_dependents);
        assert!(config.restart_dependents);
        assert_eq!(config.name.as_deref(), Some("main"));
    }

    #[test]
    fn test_serialization_round_trip() {
        let config = CoordinatorConfig::default().with_name("main");
        let json = serde_json::to_string(&config).unwrap();
        let back: CoordinatorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name.as_deref(), Some("main"));
        assert_eq!(back.stop_dependents, config.stop_dependents);
    }
}
