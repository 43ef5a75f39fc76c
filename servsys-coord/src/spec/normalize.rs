//! Canonicalization of service references.

// Layer 1: Standard library imports
use std::fmt;
use std::sync::Arc;

// Layer 3: Internal module imports
use super::error::SpecError;
use super::traits::Service;
use super::types::{ServiceSpec, StartArg};

/// One of the three accepted shapes of a service reference.
///
/// Callers may hand the coordinator a bare service, a service with a single
/// bound argument, or a pre-built [`ServiceSpec`]. All three normalize to
/// the same canonical form.
#[derive(Clone)]
pub enum SpecInput {
    /// A bare service implementation
    Service(Arc<dyn Service>),

    /// A service implementation with one bound start argument
    ServiceWithArg(Arc<dyn Service>, StartArg),

    /// A pre-built structural spec
    Spec(ServiceSpec),
}

impl SpecInput {
    /// Wraps a bare service.
    pub fn service(service: impl Service) -> Self {
        Self::Service(Arc::new(service))
    }

    /// Wraps a service with one bound argument.
    pub fn with_arg(service: impl Service, arg: impl Into<StartArg>) -> Self {
        Self::ServiceWithArg(Arc::new(service), arg.into())
    }
}

impl fmt::Debug for SpecInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Service(service) => f.debug_tuple("Service").field(&service.name()).finish(),
            Self::ServiceWithArg(service, arg) => f
                .debug_tuple("ServiceWithArg")
                .field(&service.name())
                .field(arg)
                .finish(),
            Self::Spec(spec) => f.debug_tuple("Spec").field(spec).finish(),
        }
    }
}

impl From<ServiceSpec> for SpecInput {
    fn from(spec: ServiceSpec) -> Self {
        Self::Spec(spec)
    }
}

impl<T: Service> From<T> for SpecInput {
    fn from(service: T) -> Self {
        Self::Service(Arc::new(service))
    }
}

/// Canonicalizes a service reference into a [`ServiceSpec`].
///
/// Missing fields are populated with defaults so that two inputs denoting
/// the same service with the same arguments normalize to equal specs.
///
/// # Errors
///
/// Returns [`SpecError::BadSpec`] when the reference cannot describe a
/// startable service (blank id).
///
/// # Examples
///
/// ```rust
/// use servsys_coord::spec::{normalize, Service, ServiceSpec, SpecInput};
///
/// struct Log;
/// impl Service for Log {
///     fn name(&self) -> &'static str {
///         "log"
///     }
/// }
///
/// let from_service = normalize(SpecInput::service(Log)).unwrap();
/// let from_spec = normalize(SpecInput::from(ServiceSpec::new(Log))).unwrap();
/// assert_eq!(from_service, from_spec);
/// ```
pub fn normalize(input: SpecInput) -> Result<ServiceSpec, SpecError> {
    let spec = match input {
        SpecInput::Service(service) => ServiceSpec::from_arc(service),
        SpecInput::ServiceWithArg(service, arg) => ServiceSpec::from_arc(service).with_arg(arg),
        SpecInput::Spec(spec) => spec,
    };

    if spec.id().as_str().trim().is_empty() {
        return Err(SpecError::bad_spec("service id must not be blank"));
    }

    Ok(spec)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::spec::RestartPolicy;

    struct Alpha;

    impl Service for Alpha {
        fn name(&self) -> &'static str {
            "alpha"
        }
    }

    struct Nameless;

    impl Service for Nameless {
        fn name(&self) -> &'static str {
            ""
        }
    }

    #[test]
    fn test_normalize_bare_service() {
        let spec = normalize(SpecInput::service(Alpha)).unwrap();
        assert_eq!(spec.id().as_str(), "alpha");
        assert!(spec.args().is_empty());
        assert_eq!(spec.restart(), RestartPolicy::Transient);
    }

    #[test]
    fn test_normalize_service_with_arg() {
        let spec = normalize(SpecInput::with_arg(Alpha, 42i64)).unwrap();
        assert_eq!(spec.args().len(), 1);
    }

    #[test]
    fn test_normalize_prebuilt_spec_is_identity() {
        let built = ServiceSpec::new(Alpha)
            .with_arg("x")
            .with_restart(RestartPolicy::Permanent);
        let spec = normalize(SpecInput::from(built.clone())).unwrap();
        assert_eq!(spec, built);
        assert_eq!(spec.restart(), RestartPolicy::Permanent);
    }

    #[test]
    fn test_equal_inputs_normalize_equal() {
        let a = normalize(SpecInput::with_arg(Alpha, 42i64)).unwrap();
        let b = normalize(SpecInput::from(ServiceSpec::new(Alpha).with_arg(42i64))).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_blank_id_is_rejected() {
        let result = normalize(SpecInput::service(Nameless));
        assert!(matches!(result, Err(SpecError::BadSpec { .. })));
    }

    #[test]
    fn test_from_service_shorthand() {
        let spec = normalize(SpecInput::from(Alpha)).unwrap();
        assert_eq!(spec.id().as_str(), "alpha");
    }
}
