//! Credential gate: the RFID watcher.

use crate::allowlist::AllowList;
use roomlink_engine::{DoorEngine, LightEngine};
use roomlink_hardware::{HardwareError, ScannerDevice, ServoDevice, SwitchDevice};
use roomlink_sync::RemoteStore;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Visible feedback for a denied scan.
#[derive(Debug, Clone, Copy)]
pub struct DenyFeedback {
    /// On/off repetitions of the denial blink.
    pub blink_count: u32,

    /// Interval between blink edges.
    pub blink_interval: Duration,
}

/// Watch the credential scanner and gate door access.
///
/// A permitted credential is equivalent to a button press: it toggles
/// the door. An open-only policy was deliberately not used, since a
/// second scan would then leave the door stuck open until the
/// auto-close fired. A denied credential blinks the status light and
/// leaves the door untouched.
///
/// Every read attempt, including misreads, is followed by a debounce
/// sleep so a tag held against the reader registers once.
pub async fn run<D, S, W, R>(
    mut scanner: D,
    door: DoorEngine<S, R>,
    light: LightEngine<W, R>,
    allowlist: AllowList,
    feedback: DenyFeedback,
    debounce: Duration,
    cancel: CancellationToken,
) where
    D: ScannerDevice,
    S: ServoDevice + 'static,
    W: SwitchDevice + 'static,
    R: RemoteStore + 'static,
{
    info!(credentials = allowlist.len(), "credential gate started");
    if allowlist.is_empty() {
        warn!("credential allow-list is empty, every scan will be denied");
    }

    loop {
        let event = tokio::select! {
            () = cancel.cancelled() => break,
            event = scanner.read_credential() => event,
        };

        match event {
            Ok(scan) => {
                if allowlist.permits(&scan.credential) {
                    info!(credential = %scan.credential, "access granted");
                    match door.toggle().await {
                        Ok(state) => info!(%state, "scan toggled door"),
                        Err(e) => warn!(error = %e, "door toggle failed"),
                    }
                } else {
                    warn!(credential = %scan.credential, "access denied");
                    if let Err(e) = light
                        .blink(feedback.blink_count, feedback.blink_interval)
                        .await
                    {
                        warn!(error = %e, "denial blink failed");
                    }
                }
            }
            Err(HardwareError::Disconnected { .. }) => {
                warn!("scanner disconnected, credential access disabled");
                break;
            }
            Err(e) => {
                debug!(error = %e, "credential read failed, retrying");
            }
        }

        tokio::time::sleep(debounce).await;
    }

    info!("credential gate stopped");
}
