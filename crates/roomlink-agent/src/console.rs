//! Interactive emulation console.
//!
//! Reads commands from stdin and drives the mock peripheral handles,
//! so an agent running without physical hardware can still be
//! exercised end to end: press the button, scan tags, feed the climate
//! sensor. Closing stdin leaves the agent running headless; `quit`
//! shuts the whole process down.

use roomlink_core::Credential;
use roomlink_hardware::mock::{MockButtonHandle, MockClimateHandle, MockScannerHandle};
use std::ops::ControlFlow;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::warn;

const USAGE: &str =
    "commands: press | scan <id> | misread | climate <temp> <humidity> | fail | quit";

/// Handles to the mock peripherals the console can drive.
pub struct ConsoleHandles {
    pub button: MockButtonHandle,
    pub scanner: MockScannerHandle,
    pub climate: Option<MockClimateHandle>,
}

/// Run the console until stdin closes or the agent shuts down.
pub async fn run(handles: ConsoleHandles, shutdown: CancellationToken) {
    println!("roomlink emulation console - {USAGE}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = tokio::select! {
            () = shutdown.cancelled() => break,
            line = lines.next_line() => line,
        };

        match line {
            Ok(Some(line)) => {
                if handle_line(line.trim(), &handles, &shutdown).await.is_break() {
                    break;
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!(error = %e, "console read failed");
                break;
            }
        }
    }
}

async fn handle_line(
    line: &str,
    handles: &ConsoleHandles,
    shutdown: &CancellationToken,
) -> ControlFlow<()> {
    let mut parts = line.split_whitespace();
    match parts.next() {
        None => {}
        Some("press") => {
            if let Err(e) = handles.button.press().await {
                warn!(error = %e, "press injection failed");
            }
        }
        Some("scan") => match parts.next().map(str::parse::<Credential>) {
            Some(Ok(credential)) => {
                if let Err(e) = handles.scanner.present(credential).await {
                    warn!(error = %e, "scan injection failed");
                }
            }
            _ => println!("usage: scan <numeric id>"),
        },
        Some("misread") => {
            if let Err(e) = handles.scanner.misread().await {
                warn!(error = %e, "misread injection failed");
            }
        }
        Some("climate") => {
            let reading = match (
                parts.next().map(str::parse::<f32>),
                parts.next().map(str::parse::<f32>),
            ) {
                (Some(Ok(temperature)), Some(Ok(humidity))) => Some((temperature, humidity)),
                _ => None,
            };
            match (&handles.climate, reading) {
                (Some(climate), Some((temperature, humidity))) => {
                    if let Err(e) = climate.submit(temperature, humidity).await {
                        warn!(error = %e, "climate injection failed");
                    }
                }
                (None, _) => println!("climate sensor not present"),
                (_, None) => println!("usage: climate <temp> <humidity>"),
            }
        }
        Some("fail") => match &handles.climate {
            Some(climate) => {
                if let Err(e) = climate.fail().await {
                    warn!(error = %e, "climate failure injection failed");
                }
            }
            None => println!("climate sensor not present"),
        },
        Some("quit") | Some("exit") => {
            shutdown.cancel();
            return ControlFlow::Break(());
        }
        Some(other) => println!("unknown command: {other} ({USAGE})"),
    }
    ControlFlow::Continue(())
}
