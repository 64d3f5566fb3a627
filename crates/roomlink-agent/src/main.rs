use anyhow::Context;
use clap::Parser;
use roomlink_agent::config::{AgentConfig, Cli};
use roomlink_agent::console::{self, ConsoleHandles};
use roomlink_agent::runtime::{self, AgentDevices};
use roomlink_hardware::devices::{
    AnyButtonDevice, AnyClimateDevice, AnyScannerDevice, AnyServoDevice, AnySwitchDevice,
};
use roomlink_hardware::mock::{MockButton, MockClimate, MockScanner, MockServo, MockSwitch};
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_filter)),
        )
        .init();

    let config = AgentConfig::load(cli.config.as_deref()).context("loading configuration")?;
    info!(
        version = roomlink_core::VERSION,
        room = config.remote.room_id,
        "starting roomlink agent"
    );

    // Emulated peripherals; real GPIO backends land behind the
    // hardware-* features of roomlink-hardware.
    let (servo, _servo_handle) = MockServo::with_name("door servo".to_string());
    let (light, _light_handle) = MockSwitch::with_name("status light".to_string());
    let (button, button_handle) = MockButton::with_name("door button".to_string());
    let (scanner, scanner_handle) = MockScanner::with_name("rfid reader".to_string());
    let (climate, climate_handle) = if config.climate.enabled {
        let (device, handle) = MockClimate::with_name("climate sensor".to_string());
        (Some(AnyClimateDevice::Mock(device)), Some(handle))
    } else {
        (None, None)
    };

    let shutdown = CancellationToken::new();
    tokio::spawn(console::run(
        ConsoleHandles {
            button: button_handle,
            scanner: scanner_handle,
            climate: climate_handle,
        },
        shutdown.clone(),
    ));

    runtime::run(
        config,
        AgentDevices {
            servo: AnyServoDevice::Mock(servo),
            light: AnySwitchDevice::Mock(light),
            button: AnyButtonDevice::Mock(button),
            scanner: AnyScannerDevice::Mock(scanner),
            climate,
        },
        shutdown,
    )
    .await
}
