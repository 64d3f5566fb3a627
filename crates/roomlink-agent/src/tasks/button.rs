//! Door button watcher.

use roomlink_engine::DoorEngine;
use roomlink_hardware::{ButtonDevice, HardwareError, ServoDevice};
use roomlink_sync::RemoteStore;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Watch the door button and toggle the door on every press.
///
/// A fixed debounce sleep follows each handled press so contact bounce
/// does not register as repeated presses. Transient read errors are
/// retried; a disconnected button disables local control until restart.
pub async fn run<B, S, R>(
    mut button: B,
    door: DoorEngine<S, R>,
    debounce: Duration,
    cancel: CancellationToken,
) where
    B: ButtonDevice,
    S: ServoDevice + 'static,
    R: RemoteStore + 'static,
{
    info!("button watcher started");

    loop {
        let event = tokio::select! {
            () = cancel.cancelled() => break,
            event = button.wait_for_press() => event,
        };

        match event {
            Ok(_press) => {
                match door.toggle().await {
                    Ok(state) => info!(%state, "button toggled door"),
                    Err(e) => warn!(error = %e, "door toggle failed"),
                }
                tokio::time::sleep(debounce).await;
            }
            Err(HardwareError::Disconnected { .. }) => {
                warn!("button disconnected, local door control disabled");
                break;
            }
            Err(e) => {
                debug!(error = %e, "button read failed, retrying");
                tokio::time::sleep(debounce).await;
            }
        }
    }

    info!("button watcher stopped");
}
