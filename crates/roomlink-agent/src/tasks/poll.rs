//! Remote poll loop.

use roomlink_core::DeviceKind;
use roomlink_engine::{DoorEngine, LightEngine};
use roomlink_hardware::{ServoDevice, SwitchDevice};
use roomlink_sync::RemoteStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Periodically pull the backend's view and reconcile the engines.
///
/// This is the only path by which remote commands reach hardware. The
/// engines apply a state only when it disagrees with local truth, so a
/// quiet backend costs nothing and an echoed-back state never triggers
/// redundant motion or a second push.
pub async fn run<S, W, R>(
    store: Arc<R>,
    door: DoorEngine<S, R>,
    light: LightEngine<W, R>,
    interval: Duration,
    cancel: CancellationToken,
) where
    S: ServoDevice + 'static,
    W: SwitchDevice + 'static,
    R: RemoteStore + 'static,
{
    info!(?interval, "remote poll loop started");
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            () = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let snapshot = store.poll().await;
        if snapshot.is_empty() {
            continue;
        }

        if let Some(remote) = snapshot.get(DeviceKind::Door) {
            if let Err(e) = door.reconcile(remote).await {
                warn!(error = %e, "door reconcile failed");
            }
        }
        if let Some(remote) = snapshot.get(DeviceKind::Light) {
            if let Err(e) = light.reconcile(remote).await {
                warn!(error = %e, "light reconcile failed");
            }
        }
    }

    info!("remote poll loop stopped");
}
