//! Climate telemetry exporter.

use roomlink_core::DeviceKind;
use roomlink_hardware::{ClimateDevice, HardwareError};
use roomlink_sync::RemoteStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Periodically sample the climate sensor and push the readings.
///
/// The sensor rejects back-to-back reads, so a failed sample is simply
/// skipped until the next interval, never retried immediately. Push
/// outcomes are ignored here; the sync client already logs failures.
pub async fn run<C, R>(
    mut sensor: C,
    store: Arc<R>,
    interval: Duration,
    cancel: CancellationToken,
) where
    C: ClimateDevice,
    R: RemoteStore + 'static,
{
    info!(?interval, "climate exporter started");
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            () = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        match sensor.sample().await {
            Ok(reading) => {
                debug!(
                    temperature = %reading.temperature_c,
                    humidity = %reading.humidity_pct,
                    "climate sample"
                );
                let temperature = format!("{:.1}", reading.temperature_c);
                store.push(DeviceKind::Temperature, &temperature).await;
                let humidity = format!("{:.1}", reading.humidity_pct);
                store.push(DeviceKind::Humidity, &humidity).await;
            }
            Err(HardwareError::Disconnected { .. }) => {
                warn!("climate sensor disconnected, telemetry disabled");
                break;
            }
            Err(e) => {
                debug!(error = %e, "climate sample failed, skipping until next interval");
            }
        }
    }

    info!("climate exporter stopped");
}
