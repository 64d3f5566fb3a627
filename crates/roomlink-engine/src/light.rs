//! Light reconciliation engine.
//!
//! The door's simpler sibling: two states, no timer, no sweep. It also
//! provides the denial blink used by the credential gate, which flashes
//! the output and restores the pre-blink level without touching engine
//! state or the remote store.

use roomlink_core::{DeviceKind, DeviceState};
use roomlink_hardware::{Result, SwitchDevice};
use roomlink_sync::RemoteStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info};

struct LightInner<W, R> {
    output: W,
    state: DeviceState,
    store: Arc<R>,
}

/// Cloneable handle to the light reconciliation engine.
///
/// The light boots off; the output is assumed dark at construction.
pub struct LightEngine<W, R> {
    inner: Arc<Mutex<LightInner<W, R>>>,
}

impl<W, R> Clone for LightEngine<W, R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<W, R> LightEngine<W, R>
where
    W: SwitchDevice + 'static,
    R: RemoteStore + 'static,
{
    /// Create an engine over a dark output.
    pub fn new(output: W, store: Arc<R>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(LightInner {
                output,
                state: DeviceState::Off,
                store,
            })),
        }
    }

    /// Drive the light to `target`. No-op when already there.
    ///
    /// Returns `true` if the output actually changed.
    pub async fn set(&self, target: DeviceState) -> Result<bool> {
        let mut inner = self.inner.lock().await;
        Self::apply(&mut inner, target).await
    }

    /// Flip the light state atomically under the engine lock.
    ///
    /// Returns the state the light ended up in.
    pub async fn toggle(&self) -> Result<DeviceState> {
        let mut inner = self.inner.lock().await;
        let target = inner.state.toggled();
        Self::apply(&mut inner, target).await?;
        Ok(target)
    }

    /// Apply the backend's belief about the light.
    ///
    /// Acts only when `remote` disagrees with local state.
    pub async fn reconcile(&self, remote: DeviceState) -> Result<bool> {
        let mut inner = self.inner.lock().await;
        if inner.state == remote {
            return Ok(false);
        }
        info!(local = %inner.state, %remote, "applying remote light correction");
        Self::apply(&mut inner, remote).await
    }

    /// Current light state.
    pub async fn state(&self) -> DeviceState {
        self.inner.lock().await.state
    }

    /// Flash the output `count` times with `interval` between edges,
    /// then restore the pre-blink level.
    ///
    /// Used as visible denial feedback. Holds the engine lock for the
    /// whole pattern so a concurrent toggle cannot interleave with the
    /// flashes; engine state and the remote store are untouched.
    pub async fn blink(&self, count: u32, interval: Duration) -> Result<()> {
        let mut inner = self.inner.lock().await;
        let restore = inner.state;

        debug!(count, "blinking light");
        for _ in 0..count {
            inner.output.write(true).await?;
            tokio::time::sleep(interval).await;
            inner.output.write(false).await?;
            tokio::time::sleep(interval).await;
        }
        inner.output.write(restore.is_on()).await?;
        Ok(())
    }

    async fn apply(inner: &mut LightInner<W, R>, target: DeviceState) -> Result<bool> {
        if inner.state == target {
            debug!(state = %target, "light already in requested state");
            return Ok(false);
        }

        inner.output.write(target.is_on()).await?;
        inner.state = target;
        info!(state = %target, "light switched");

        let store = Arc::clone(&inner.store);
        tokio::spawn(async move {
            let outcome = store.push(DeviceKind::Light, target.as_str()).await;
            if !outcome.is_delivered() {
                debug!(state = %target, %outcome, "light state push not delivered");
            }
        });

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingStore, settle};
    use roomlink_hardware::mock::{MockSwitch, MockSwitchHandle};

    fn engine_with(
        store: Arc<RecordingStore>,
    ) -> (LightEngine<MockSwitch, RecordingStore>, MockSwitchHandle) {
        let (switch, handle) = MockSwitch::new();
        (LightEngine::new(switch, store), handle)
    }

    #[tokio::test(start_paused = true)]
    async fn toggle_drives_output_and_pushes() {
        let store = Arc::new(RecordingStore::default());
        let (engine, switch) = engine_with(Arc::clone(&store));

        assert_eq!(engine.toggle().await.unwrap(), DeviceState::On);
        assert_eq!(engine.toggle().await.unwrap(), DeviceState::Off);
        settle().await;

        assert_eq!(switch.levels(), vec![true, false]);
        assert_eq!(
            store.pushes(),
            vec![
                (DeviceKind::Light, "on".to_string()),
                (DeviceKind::Light, "off".to_string()),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn set_is_idempotent() {
        let store = Arc::new(RecordingStore::default());
        let (engine, switch) = engine_with(Arc::clone(&store));

        assert!(engine.set(DeviceState::On).await.unwrap());
        assert!(!engine.set(DeviceState::On).await.unwrap());
        settle().await;

        assert_eq!(switch.write_count(), 1);
        assert_eq!(store.pushes().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn reconcile_agreeing_state_is_inert() {
        let store = Arc::new(RecordingStore::default());
        let (engine, switch) = engine_with(Arc::clone(&store));

        assert!(!engine.reconcile(DeviceState::Off).await.unwrap());
        settle().await;

        assert_eq!(switch.write_count(), 0);
        assert!(store.pushes().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn blink_restores_level_and_stays_silent() {
        let store = Arc::new(RecordingStore::default());
        let (engine, switch) = engine_with(Arc::clone(&store));

        engine.blink(3, Duration::from_millis(100)).await.unwrap();
        settle().await;

        assert_eq!(
            switch.levels(),
            vec![true, false, true, false, true, false, false]
        );
        assert_eq!(engine.state().await, DeviceState::Off);
        assert!(store.pushes().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn blink_restores_lit_output() {
        let store = Arc::new(RecordingStore::default());
        let (engine, switch) = engine_with(Arc::clone(&store));

        engine.set(DeviceState::On).await.unwrap();
        engine.blink(1, Duration::from_millis(100)).await.unwrap();

        assert!(switch.is_on());
        assert_eq!(engine.state().await, DeviceState::On);
    }
}
