//! Type definitions for service specifications.

// Layer 1: Standard library imports
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};

// Layer 3: Internal module imports
use super::traits::Service;

/// Stable identifier of a service.
///
/// Two specs with the same id and the same start arguments denote the same
/// service instance.
///
/// # Examples
///
/// ```rust
/// use servsys_coord::spec::ServiceId;
///
/// let id = ServiceId::from("log");
/// assert_eq!(id.as_str(), "log");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ServiceId(String);

impl ServiceId {
    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ServiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ServiceId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ServiceId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Opaque start argument bound into a spec.
///
/// Arguments participate in spec identity: the same service started with
/// different arguments is a different instance. The [`StartArg::Specs`]
/// variant carries the payload used by parametric services whose needs are
/// part of their argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StartArg {
    /// Free-form textual argument
    Text(String),

    /// Integral argument
    Number(i64),

    /// A list of specs, for services whose needs are passed in at start time
    Specs(Vec<ServiceSpec>),
}

impl From<&str> for StartArg {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for StartArg {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<Vec<ServiceSpec>> for StartArg {
    fn from(value: Vec<ServiceSpec>) -> Self {
        Self::Specs(value)
    }
}

/// Restart policy for a service instance.
///
/// Determines whether the coordinator should restart a terminated instance,
/// based on how it exited. Follows Erlang/OTP restart policies.
///
/// # Examples
///
/// ```rust
/// use servsys_coord::spec::RestartPolicy;
///
/// assert!(RestartPolicy::Transient.should_restart(true));   // abnormal exit
/// assert!(!RestartPolicy::Transient.should_restart(false)); // normal exit
/// assert!(!RestartPolicy::Temporary.should_restart(true));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RestartPolicy {
    /// Always eligible for restart, regardless of exit reason.
    Permanent,

    /// Eligible for restart only after an abnormal exit. The default.
    Transient,

    /// Never eligible for restart.
    Temporary,
}

impl RestartPolicy {
    /// Returns `true` if this policy allows a restart for the given exit
    /// condition.
    ///
    /// `is_abnormal` is `true` when the instance exited with a reason other
    /// than normal or shutdown.
    pub fn should_restart(&self, is_abnormal: bool) -> bool {
        match self {
            RestartPolicy::Permanent => true,
            RestartPolicy::Transient => is_abnormal,
            RestartPolicy::Temporary => false,
        }
    }
}

impl Default for RestartPolicy {
    fn default() -> Self {
        RestartPolicy::Transient
    }
}

/// Start descriptor: the service implementation plus its bound arguments.
///
/// The service is held behind a shared vtable so specs stay cheap to clone
/// and hashable; identity comes from the owning spec's id and the arguments,
/// never from the vtable pointer.
#[derive(Clone)]
pub struct StartSpec {
    /// The service implementation to start
    pub service: Arc<dyn Service>,

    /// Arguments bound into this instance
    pub args: Vec<StartArg>,
}

impl fmt::Debug for StartSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StartSpec")
            .field("service", &self.service.name())
            .field("args", &self.args)
            .finish()
    }
}

/// Canonical, normalized description of one service instance.
///
/// Equality and hashing cover the id and the start arguments only: two
/// specs that would start the same way compare equal even when built from
/// different input shapes, and the restart policy does not change identity.
///
/// # Examples
///
/// ```rust
/// use servsys_coord::spec::{RestartPolicy, Service, ServiceSpec};
///
/// struct Log;
/// impl Service for Log {
///     fn name(&self) -> &'static str {
///         "log"
///     }
/// }
///
/// let spec = ServiceSpec::new(Log);
/// assert_eq!(spec.id().as_str(), "log");
/// assert_eq!(spec.restart(), RestartPolicy::Transient);
///
/// let same = ServiceSpec::new(Log).with_restart(RestartPolicy::Permanent);
/// assert_eq!(spec, same);
/// ```
#[derive(Debug, Clone)]
pub struct ServiceSpec {
    id: ServiceId,
    start: StartSpec,
    restart: RestartPolicy,
}

impl ServiceSpec {
    /// Creates a spec for the given service with no arguments and the
    /// default restart policy.
    pub fn new(service: impl Service) -> Self {
        Self::from_arc(Arc::new(service))
    }

    /// Creates a spec from an already-shared service implementation.
    pub fn from_arc(service: Arc<dyn Service>) -> Self {
        let id = ServiceId::from(service.name());
        Self {
            id,
            start: StartSpec {
                service,
                args: Vec::new(),
            },
            restart: RestartPolicy::default(),
        }
    }

    /// Overrides the spec id.
    ///
    /// Useful when the same service module backs several distinct
    /// instances.
    pub fn with_id(mut self, id: impl Into<ServiceId>) -> Self {
        self.id = id.into();
        self
    }

    /// Appends a start argument.
    pub fn with_arg(mut self, arg: impl Into<StartArg>) -> Self {
        self.start.args.push(arg.into());
        self
    }

    /// Overrides the restart policy.
    pub fn with_restart(mut self, restart: RestartPolicy) -> Self {
        self.restart = restart;
        self
    }

    /// The spec's identifier.
    pub fn id(&self) -> &ServiceId {
        &self.id
    }

    /// The service implementation behind this spec.
    pub fn service(&self) -> &Arc<dyn Service> {
        &self.start.service
    }

    /// The bound start arguments.
    pub fn args(&self) -> &[StartArg] {
        &self.start.args
    }

    /// The restart policy in effect for this spec.
    pub fn restart(&self) -> RestartPolicy {
        self.restart
    }
}

impl PartialEq for ServiceSpec {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.start.args == other.start.args
    }
}

impl Eq for ServiceSpec {}

impl Hash for ServiceSpec {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
        self.start.args.hash(state);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    struct Alpha;

    impl Service for Alpha {
        fn name(&self) -> &'static str {
            "alpha"
        }
    }

    struct Beta;

    impl Service for Beta {
        fn name(&self) -> &'static str {
            "beta"
        }
    }

    #[test]
    fn test_service_id_display() {
        let id = ServiceId::from("alpha");
        assert_eq!(id.to_string(), "alpha");
        assert_eq!(id.as_str(), "alpha");
    }

    #[test]
    fn test_restart_policy_permanent() {
        assert!(RestartPolicy::Permanent.should_restart(true));
        assert!(RestartPolicy::Permanent.should_restart(false));
    }

    #[test]
    fn test_restart_policy_transient() {
        assert!(RestartPolicy::Transient.should_restart(true));
        assert!(!RestartPolicy::Transient.should_restart(false));
    }

    #[test]
    fn test_restart_policy_temporary() {
        assert!(!RestartPolicy::Temporary.should_restart(true));
        assert!(!RestartPolicy::Temporary.should_restart(false));
    }

    #[test]
    fn test_restart_policy_default_is_transient() {
        assert_eq!(RestartPolicy::default(), RestartPolicy::Transient);
    }

    #[test]
    fn test_spec_equality_by_id_and_args() {
        let a = ServiceSpec::new(Alpha);
        let b = ServiceSpec::new(Alpha);
        let c = ServiceSpec::new(Beta);
        assert_eq!(a, b);
        assert_ne!(a, c);

        let with_arg = ServiceSpec::new(Alpha).with_arg("x");
        assert_ne!(a, with_arg);
    }

    #[test]
    fn test_spec_equality_ignores_restart_policy() {
        let transient = ServiceSpec::new(Alpha);
        let permanent = ServiceSpec::new(Alpha).with_restart(RestartPolicy::Permanent);
        assert_eq!(transient, permanent);
    }

    #[test]
    fn test_spec_hash_matches_equality() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(ServiceSpec::new(Alpha));
        assert!(set.contains(&ServiceSpec::new(Alpha).with_restart(RestartPolicy::Permanent)));
        assert!(!set.contains(&ServiceSpec::new(Beta)));
    }

    #[test]
    fn test_spec_with_id_override() {
        let spec = ServiceSpec::new(Alpha).with_id("alpha-2");
        assert_eq!(spec.id().as_str(), "alpha-2");
        assert_ne!(spec, ServiceSpec::new(Alpha));
    }

    #[test]
    fn test_nested_spec_args() {
        let inner = ServiceSpec::new(Beta);
        let outer = ServiceSpec::new(Alpha).with_arg(vec![inner.clone()]);
        let same = ServiceSpec::new(Alpha).with_arg(vec![inner]);
        assert_eq!(outer, same);
        assert_eq!(outer.args().len(), 1);
    }

    #[test]
    fn test_start_spec_debug_shows_service_name() {
        let spec = ServiceSpec::new(Alpha).with_arg(7i64);
        let debug = format!("{:?}", spec);
        assert!(debug.contains("alpha"));
        assert!(debug.contains("7"));
    }
}
