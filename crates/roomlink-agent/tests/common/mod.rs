//! Shared store double for agent integration tests.

use roomlink_core::DeviceKind;
use roomlink_sync::{DeviceRecord, DeviceSnapshot, RemoteStore, SyncOutcome};
use std::sync::Mutex;

/// Store that records pushes and serves a fixed snapshot to polls.
#[derive(Debug, Default)]
pub struct RecordingStore {
    pushes: Mutex<Vec<(DeviceKind, String)>>,
    snapshot: Mutex<DeviceSnapshot>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: DeviceSnapshot) -> Self {
        Self {
            pushes: Mutex::new(Vec::new()),
            snapshot: Mutex::new(snapshot),
        }
    }

    pub fn pushes(&self) -> Vec<(DeviceKind, String)> {
        self.pushes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    #[allow(dead_code)]
    pub fn set_snapshot(&self, snapshot: DeviceSnapshot) {
        *self.snapshot.lock().unwrap_or_else(|e| e.into_inner()) = snapshot;
    }
}

impl RemoteStore for RecordingStore {
    async fn push(&self, device: DeviceKind, state: &str) -> SyncOutcome {
        self.pushes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((device, state.to_string()));
        SyncOutcome::Delivered
    }

    async fn poll(&self) -> DeviceSnapshot {
        self.snapshot
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

/// Build a snapshot from `(kind, state)` wire strings.
pub fn snapshot(entries: &[(&str, &str)]) -> DeviceSnapshot {
    let records: Vec<DeviceRecord> = entries
        .iter()
        .map(|(kind, state)| DeviceRecord {
            kind: (*kind).to_string(),
            state: (*state).to_string(),
        })
        .collect();
    DeviceSnapshot::from_records(&records)
}
