//! Wire types for the backend protocol and snapshot normalization.

use roomlink_core::{DeviceKind, DeviceState};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Body of a `POST control_device` request.
#[derive(Debug, Clone, Serialize)]
pub struct PushRequest {
    pub room_id: u32,
    #[serde(rename = "type")]
    pub device: DeviceKind,
    pub state: String,
}

/// Response of a `GET status` request.
///
/// A missing or empty `data` field means "no devices", not an error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub data: Vec<DeviceRecord>,
}

/// One device entry in a status response.
///
/// The `type` field is kept as a raw string here so records for device
/// kinds this agent does not know are tolerated and skipped during
/// normalization instead of failing the whole poll.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceRecord {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub state: String,
}

/// Normalized view of one poll: at most one state per actuated kind.
///
/// The backend owes at most one authoritative record per device type.
/// Duplicate records are flagged with a warning and resolved last-wins
/// in iteration order; unknown kinds and telemetry kinds are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceSnapshot {
    states: HashMap<DeviceKind, DeviceState>,
}

impl DeviceSnapshot {
    /// A snapshot with no device states ("nothing changed").
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Normalize a raw record list into a snapshot.
    pub fn from_records(records: &[DeviceRecord]) -> Self {
        let mut states = HashMap::new();

        for record in records {
            let kind: DeviceKind = match record.kind.parse() {
                Ok(kind) => kind,
                Err(_) => {
                    debug!(kind = %record.kind, "ignoring record of unknown device kind");
                    continue;
                }
            };

            if !kind.is_actuated() {
                debug!(%kind, "ignoring telemetry record");
                continue;
            }

            let state: DeviceState = match record.state.parse() {
                Ok(state) => state,
                Err(_) => {
                    warn!(%kind, state = %record.state, "ignoring record with invalid state");
                    continue;
                }
            };

            if let Some(previous) = states.insert(kind, state) {
                warn!(
                    %kind,
                    %previous,
                    kept = %state,
                    "duplicate status records for device kind, keeping the last"
                );
            }
        }

        Self { states }
    }

    /// The backend's last-known state for `kind`, if present.
    #[must_use]
    pub fn get(&self, kind: DeviceKind) -> Option<DeviceState> {
        self.states.get(&kind).copied()
    }

    /// Returns `true` if the snapshot carries no device states.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Number of device states in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }
}
