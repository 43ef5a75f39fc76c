//! Types shared across the supervisor contract.

// Layer 1: Standard library imports
use std::fmt;

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;
use uuid::Uuid;

/// Opaque reference to a running worker instance.
///
/// Handles are minted by the external supervisor, which owns the worker's
/// lifetime; the coordinator only stores and passes them back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceHandle(Uuid);

impl InstanceHandle {
    /// Mints a fresh handle.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for InstanceHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for InstanceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One-shot subscription identifier for a termination notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WatchToken(Uuid);

impl WatchToken {
    /// Mints a fresh token.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for WatchToken {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WatchToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Why an instance exited.
///
/// # Examples
///
/// ```rust
/// use servsys_coord::supervisor::ExitReason;
///
/// assert!(!ExitReason::Normal.is_abnormal());
/// assert!(!ExitReason::Shutdown.is_abnormal());
/// assert!(ExitReason::other("segfault").is_abnormal());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitReason {
    /// The worker finished its work
    Normal,

    /// The worker was asked to stop
    Shutdown,

    /// Anything else; treated as abnormal
    Other(String),
}

impl ExitReason {
    /// Creates an abnormal exit reason.
    pub fn other(reason: impl Into<String>) -> Self {
        Self::Other(reason.into())
    }

    /// Returns `true` for reasons outside normal and shutdown.
    pub fn is_abnormal(&self) -> bool {
        matches!(self, Self::Other(_))
    }
}

impl fmt::Display for ExitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "normal"),
            Self::Shutdown => write!(f, "shutdown"),
            Self::Other(reason) => write!(f, "{reason}"),
        }
    }
}

/// Liveness of an instance as reported by the supervisor's probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    /// The worker is running in some active state
    Alive,

    /// The worker has been told to stop and is winding down
    WindingDown,

    /// The worker is gone
    Gone,
}

/// Outcome of a spawn request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spawn {
    /// The worker started; the handle identifies it while alive
    Started(InstanceHandle),

    /// The supervisor declined without error; nothing is recorded
    Ignored,
}

/// A termination notification delivered for a watched instance.
#[derive(Debug, Clone)]
pub struct Termination {
    /// The token handed out by the matching `watch` call
    pub token: WatchToken,

    /// Why the instance exited
    pub reason: ExitReason,
}

/// Channel end through which a supervisor delivers termination events.
pub type WatchSink = UnboundedSender<Termination>;
