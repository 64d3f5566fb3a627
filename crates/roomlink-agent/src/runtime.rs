//! Agent runtime: wiring and task supervision.
//!
//! Builds the sync client and the two engines over the registered
//! peripherals, spawns one task per command source into a JoinSet, and
//! owns the shutdown sequence: an interrupt (or a console-initiated
//! shutdown) cancels every task, which are then drained with a bounded
//! grace period before stragglers are aborted.

use crate::config::AgentConfig;
use crate::tasks;
use anyhow::Context;
use roomlink_engine::{DoorEngine, DoorProfile, LightEngine};
use roomlink_hardware::devices::{
    AnyButtonDevice, AnyClimateDevice, AnyScannerDevice, AnyServoDevice, AnySwitchDevice,
};
use roomlink_hardware::{
    ButtonDevice, ClimateDevice, DeviceInfo, ScannerDevice, ServoDevice, SmoothServo, SwitchDevice,
};
use roomlink_sync::HttpSyncClient;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// How long tasks get to wind down after cancellation.
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// The registered peripherals, one per role.
///
/// The climate sensor is optional; when absent only the telemetry task
/// is disabled and the door and light stay fully functional.
pub struct AgentDevices {
    pub servo: AnyServoDevice,
    pub light: AnySwitchDevice,
    pub button: AnyButtonDevice,
    pub scanner: AnyScannerDevice,
    pub climate: Option<AnyClimateDevice>,
}

/// Run the agent until interrupted.
///
/// # Errors
/// Returns an error only for startup failures (bad configuration,
/// unbuildable sync client). Runtime failures of individual sources
/// disable that source and are logged, never fatal.
pub async fn run(
    config: AgentConfig,
    devices: AgentDevices,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let room = config.room()?;
    let store = Arc::new(
        HttpSyncClient::new(&config.remote.base_url, room, config.push_timeout())
            .context("building sync client")?,
    );

    log_inventory(&devices).await;

    let profile = DoorProfile::new(
        config.door.open_angle,
        config.door.closed_angle,
        config.auto_close(),
    )?;
    let drive = SmoothServo::new(devices.servo, config.door.closed_angle, config.step_delay());
    let door = DoorEngine::new(drive, Arc::clone(&store), profile);
    let light = LightEngine::new(devices.light, Arc::clone(&store));

    info!(%room, "room agent ready");

    let mut set: JoinSet<()> = JoinSet::new();
    set.spawn(tasks::button::run(
        devices.button,
        door.clone(),
        config.button_debounce(),
        shutdown.clone(),
    ));
    set.spawn(tasks::access::run(
        devices.scanner,
        door.clone(),
        light.clone(),
        config.allowlist(),
        config.deny_feedback(),
        config.scan_debounce(),
        shutdown.clone(),
    ));
    set.spawn(tasks::poll::run(
        Arc::clone(&store),
        door.clone(),
        light.clone(),
        config.poll_interval(),
        shutdown.clone(),
    ));
    match devices.climate {
        Some(sensor) if config.climate.enabled => {
            set.spawn(tasks::climate::run(
                sensor,
                Arc::clone(&store),
                config.climate_interval(),
                shutdown.clone(),
            ));
        }
        Some(_) => info!("climate telemetry disabled by configuration"),
        None => info!("climate sensor absent, telemetry task disabled"),
    }

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                warn!(error = %e, "interrupt handler failed");
            }
            info!("interrupt received, shutting down");
        }
        () = shutdown.cancelled() => {
            info!("shutdown requested");
        }
    }
    shutdown.cancel();

    drain(set).await;
    info!("room agent stopped");
    Ok(())
}

/// Log what hardware this process is driving.
async fn log_inventory(devices: &AgentDevices) {
    report("door actuator", devices.servo.info().await);
    report("status light", devices.light.info().await);
    report("door button", devices.button.info().await);
    report("credential scanner", devices.scanner.info().await);
    if let Some(sensor) = &devices.climate {
        report("climate sensor", sensor.info().await);
    }
}

fn report(role: &str, info: roomlink_hardware::Result<DeviceInfo>) {
    match info {
        Ok(info) => info!(role, device = %info.name, model = %info.model, "peripheral registered"),
        Err(e) => warn!(role, error = %e, "peripheral info unavailable"),
    }
}

/// Join every task, aborting whatever outlives the grace period.
async fn drain(mut set: JoinSet<()>) {
    let deadline = tokio::time::Instant::now() + SHUTDOWN_GRACE;
    loop {
        match tokio::time::timeout_at(deadline, set.join_next()).await {
            Ok(None) => break,
            Ok(Some(Ok(()))) => {}
            Ok(Some(Err(e))) if e.is_cancelled() => {}
            Ok(Some(Err(e))) => warn!(error = %e, "task ended abnormally"),
            Err(_) => {
                warn!(remaining = set.len(), "grace period elapsed, aborting remaining tasks");
                set.abort_all();
                while let Some(result) = set.join_next().await {
                    match result {
                        Ok(()) => {}
                        Err(e) if e.is_cancelled() => {}
                        Err(e) => warn!(error = %e, "task ended abnormally"),
                    }
                }
                break;
            }
        }
    }
}
