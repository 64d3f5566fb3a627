//! Remote store contract and sync outcomes.
//!
//! The reconciliation engines depend on this trait rather than on the
//! HTTP client, so tests can inject recording or failing stores and the
//! transport can evolve without touching engine code.

use crate::types::DeviceSnapshot;
use roomlink_core::DeviceKind;
use std::fmt;
use std::future::Future;

/// Transient result of a push call.
///
/// Push failures are logged at the client and never escalate: nothing
/// in the agent treats a failed push as fatal, retries it inline, or
/// blocks on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The backend accepted the state.
    Delivered,

    /// The backend answered with a non-success status.
    Rejected { status: u16 },

    /// The backend could not be reached (DNS, connect, timeout).
    Unreachable { message: String },
}

impl SyncOutcome {
    /// Returns `true` if the backend accepted the push.
    #[must_use]
    pub fn is_delivered(&self) -> bool {
        matches!(self, SyncOutcome::Delivered)
    }
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SyncOutcome::Delivered => write!(f, "delivered"),
            SyncOutcome::Rejected { status } => write!(f, "rejected (status {status})"),
            SyncOutcome::Unreachable { message } => write!(f, "unreachable: {message}"),
        }
    }
}

/// Best-effort remote state store for one room.
///
/// Both operations are idempotent from the backend's perspective and
/// bounded in time; neither ever surfaces an error to the caller. The
/// futures are `Send` because pushes are dispatched onto their own
/// tasks so network latency never delays the actuation path.
pub trait RemoteStore: Send + Sync {
    /// Record `state` for `device` on the backend.
    ///
    /// Failure is reported through the returned [`SyncOutcome`], never
    /// as an error.
    fn push(&self, device: DeviceKind, state: &str) -> impl Future<Output = SyncOutcome> + Send;

    /// Fetch the backend's last-known state for every device in the
    /// room.
    ///
    /// Any failure yields an empty snapshot, which callers treat as
    /// "nothing changed".
    fn poll(&self) -> impl Future<Output = DeviceSnapshot> + Send;
}
