//! Reconciliation engines for the room's actuated devices.
//!
//! Each engine owns the authoritative local state of one device and is
//! the only component allowed to drive its actuator. Every external
//! entry point serializes on the engine's lock, so concurrent command
//! sources (button, credential gate, remote poll, auto-close timer)
//! can never interleave motion.

pub mod door;
pub mod light;

pub use door::{DoorEngine, DoorProfile};
pub use light::LightEngine;

#[cfg(test)]
mod testing {
    //! Shared store doubles for engine tests.

    use roomlink_core::DeviceKind;
    use roomlink_sync::{DeviceSnapshot, RemoteStore, SyncOutcome};
    use std::sync::Mutex;

    /// Store that records every push and always succeeds.
    #[derive(Debug, Default)]
    pub struct RecordingStore {
        pushes: Mutex<Vec<(DeviceKind, String)>>,
    }

    impl RecordingStore {
        pub fn pushes(&self) -> Vec<(DeviceKind, String)> {
            self.pushes
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .clone()
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
            DeviceSnapshot::empty()
        }
    }

    /// Store whose pushes always fail with a transport error.
    #[derive(Debug)]
    pub struct FailingStore;

    impl RemoteStore for FailingStore {
        async fn push(&self, _device: DeviceKind, _state: &str) -> SyncOutcome {
            SyncOutcome::Unreachable {
                message: "connection refused".to_string(),
            }
        }

        async fn poll(&self) -> DeviceSnapshot {
            DeviceSnapshot::empty()
        }
    }

    /// Give spawned fire-and-forget tasks a chance to run.
    pub async fn settle() {
        for _ in 0..20 {
            tokio::task::yield_now().await;
        }
    }
}
