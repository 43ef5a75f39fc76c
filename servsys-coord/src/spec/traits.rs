//! The service contract seen by the resolver.

// Layer 3: Internal module imports
use super::normalize::SpecInput;
use super::types::StartArg;

/// A service module that can be placed under coordination.
///
/// The trait is the vtable behind a [`ServiceSpec`](super::ServiceSpec):
/// it names the service and declares what it needs. The actual
/// `start_link`-style entry point is invoked by the external supervisor and
/// is not part of this contract.
///
/// # Declaring needs
///
/// A service declares its dependencies through one of two forms:
///
/// - [`needs`](Service::needs): the zero-argument form, for services whose
///   dependencies are fixed.
/// - [`needs_with`](Service::needs_with): the argument-matching form, for
///   services whose dependencies derive from their start arguments. The
///   resolver prefers this form whenever the spec carries arguments and the
///   implementation answers; returning `None` falls back to the
///   zero-argument form.
///
/// Both default to "no needs", so a leaf service only implements
/// [`name`](Service::name).
///
/// # Examples
///
/// ```rust
/// use servsys_coord::spec::{Service, SpecInput};
///
/// struct Log;
/// impl Service for Log {
///     fn name(&self) -> &'static str {
///         "log"
///     }
/// }
///
/// struct Loop;
/// impl Service for Loop {
///     fn name(&self) -> &'static str {
///         "loop"
///     }
///
///     fn needs(&self) -> Vec<SpecInput> {
///         vec![SpecInput::service(Log)]
///     }
/// }
/// ```
pub trait Service: Send + Sync + 'static {
    /// Stable identifier of this service; used as the default spec id.
    fn name(&self) -> &'static str;

    /// Dependencies of this service, zero-argument form.
    fn needs(&self) -> Vec<SpecInput> {
        Vec::new()
    }

    /// Dependencies derived from the start arguments.
    ///
    /// Return `Some` to answer for the given arguments; `None` defers to
    /// [`needs`](Service::needs).
    fn needs_with(&self, args: &[StartArg]) -> Option<Vec<SpecInput>> {
        let _ = args;
        None
    }
}
