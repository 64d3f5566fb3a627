//! Best-effort synchronization with the room backend.
//!
//! The engines own local truth; this crate owns the conversation with
//! the remote store that mirrors it. Pushes record local changes
//! upstream, polls fetch the backend's view for reconciliation, and
//! neither ever blocks or fails the actuation path.

pub mod client;
pub mod store;
pub mod types;

pub use client::{HttpSyncClient, SyncError};
pub use store::{RemoteStore, SyncOutcome};
pub use types::{DeviceRecord, DeviceSnapshot, PushRequest, StatusResponse};
