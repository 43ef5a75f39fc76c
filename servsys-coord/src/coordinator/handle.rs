//! Client handle for a running coordinator.

// Layer 1: Standard library imports
use std::fmt;
use std::sync::LazyLock;

// Layer 2: Third-party crate imports
use dashmap::DashMap;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::oneshot;

// Layer 3: Internal module imports
use super::core::Request;
use super::error::{QueryError, StartError, StopError};
use super::types::{ServiceStatus, StartOutcome};
use crate::spec::SpecInput;
use crate::supervisor::InstanceHandle;

/// Process-wide directory of named coordinators.
static DIRECTORY: LazyLock<DashMap<String, CoordinatorHandle>> = LazyLock::new(DashMap::new);

pub(crate) fn register(name: &str, handle: CoordinatorHandle) {
    DIRECTORY.insert(name.to_string(), handle);
}

pub(crate) fn deregister(name: &str) {
    DIRECTORY.remove(name);
}

/// Cheaply cloneable handle to a coordinator task.
///
/// Every operation submits a request and awaits its reply; requests are
/// answered in arrival order by the coordinator's single task. All methods
/// report `Closed` once the coordinator is gone.
///
/// # Examples
///
/// ```rust
/// use servsys_coord::coordinator::{CoordinatorBuilder, StartOutcome};
/// use servsys_coord::spec::Service;
/// use servsys_coord::supervisor::InProcessSupervisor;
///
/// struct Log;
/// impl Service for Log {
///     fn name(&self) -> &'static str {
///         "log"
///     }
/// }
///
/// # tokio_test::block_on(async {
/// let coordinator = CoordinatorBuilder::new()
///     .with_supervisor(InProcessSupervisor::new())
///     .spawn()
///     .unwrap();
///
/// let outcome = coordinator.start(Log).await.unwrap();
/// assert!(matches!(outcome, StartOutcome::Started(_)));
/// # });
/// ```
#[derive(Clone)]
pub struct CoordinatorHandle {
    requests: UnboundedSender<Request>,
}

impl CoordinatorHandle {
    pub(crate) fn new(requests: UnboundedSender<Request>) -> Self {
        Self { requests }
    }

    /// Looks up a coordinator by the logical name it was built with.
    ///
    /// Names disappear from the directory when their coordinator's task
    /// ends.
    pub fn registered(name: &str) -> Option<CoordinatorHandle> {
        DIRECTORY.get(name).map(|entry| entry.value().clone())
    }

    /// Starts a service and everything it needs, in dependency order.
    ///
    /// # Errors
    ///
    /// Returns [`StartError::Cyclic`] for cyclic graphs, the supervisor's
    /// error verbatim when a spawn fails (prerequisites already started
    /// remain running), or [`StartError::Closed`] when the coordinator is
    /// gone.
    pub async fn start(&self, input: impl Into<SpecInput>) -> Result<StartOutcome, StartError> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(Request::Start {
                input: input.into(),
                reply,
            })
            .map_err(|_| StartError::Closed)?;
        response.await.map_err(|_| StartError::Closed)?
    }

    /// Stops a running service unless another running service needs it.
    ///
    /// The spec keeps reading as tracked until its termination notification
    /// is processed.
    ///
    /// # Errors
    ///
    /// Returns [`StopError::NotFound`] when the spec is not running,
    /// [`StopError::Needed`] when a running dependent declares it, or the
    /// supervisor's termination error verbatim.
    pub async fn stop(&self, input: impl Into<SpecInput>) -> Result<(), StopError> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(Request::Stop {
                input: input.into(),
                reply,
            })
            .map_err(|_| StopError::Closed)?;
        response.await.map_err(|_| StopError::Closed)?
    }

    /// True iff the service is running and nothing running needs it.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError`] for inputs that do not normalize or when the
    /// coordinator is gone.
    pub async fn can_stop(&self, input: impl Into<SpecInput>) -> Result<bool, QueryError> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(Request::CanStop {
                input: input.into(),
                reply,
            })
            .map_err(|_| QueryError::Closed)?;
        response.await.map_err(|_| QueryError::Closed)?
    }

    /// Handle of the running instance for a spec, if any.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError`] for inputs that do not normalize or when the
    /// coordinator is gone.
    pub async fn lookup(
        &self,
        input: impl Into<SpecInput>,
    ) -> Result<Option<InstanceHandle>, QueryError> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(Request::Lookup {
                input: input.into(),
                reply,
            })
            .map_err(|_| QueryError::Closed)?;
        response.await.map_err(|_| QueryError::Closed)?
    }

    /// Lifecycle status of a spec, combining registry membership with the
    /// supervisor's liveness probe.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError`] for inputs that do not normalize or when the
    /// coordinator is gone.
    pub async fn status(&self, input: impl Into<SpecInput>) -> Result<ServiceStatus, QueryError> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(Request::Status {
                input: input.into(),
                reply,
            })
            .map_err(|_| QueryError::Closed)?;
        response.await.map_err(|_| QueryError::Closed)?
    }
}

impl fmt::Debug for CoordinatorHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoordinatorHandle").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_unregistered_name_is_absent() {
        assert!(CoordinatorHandle::registered("nope").is_none());
    }
}
