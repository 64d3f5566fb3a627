//! Peripheral device trait definitions.
//!
//! This module defines trait interfaces for the room agent's peripheral
//! boundary: the angular door actuator, the binary status light output,
//! the door button, the credential scanner, and the optional climate
//! sensor. The traits establish the contract between the reconciliation
//! engines and the physical (or mocked) hardware, enabling polymorphic
//! behavior and easy substitution between mock and real implementations.
//!
//! All traits use native async methods via RPITIT (Return Position Impl
//! Trait In Traits, Rust 1.90 + Edition 2024). The methods are declared
//! in the desugared `impl Future + Send` form because their futures are
//! awaited from spawned engine tasks (auto-close timers, fire-and-forget
//! pushes); implementations can still be written with plain `async fn`.

use crate::error::Result;
use crate::types::DeviceInfo;
use roomlink_core::Credential;
use std::future::Future;

/// A door button press.
///
/// Carries the detection timestamp so watchers can log and debounce
/// against the actual edge time rather than the handling time.
#[derive(Debug, Clone)]
pub struct PressEvent {
    /// Timestamp when the press edge was detected.
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl PressEvent {
    /// Create a press event stamped with the current time.
    #[must_use]
    pub fn now() -> Self {
        Self {
            timestamp: chrono::Utc::now(),
        }
    }
}

impl Default for PressEvent {
    fn default() -> Self {
        Self::now()
    }
}

/// A credential scan.
///
/// Produced by a [`ScannerDevice`] each time a tag is presented. The
/// credential is opaque; access decisions happen in the caller against
/// a configured allow-list.
#[derive(Debug, Clone)]
pub struct ScanEvent {
    /// The scanned credential identifier.
    pub credential: Credential,

    /// Timestamp when the scan was read.
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl ScanEvent {
    /// Create a scan event stamped with the current time.
    #[must_use]
    pub fn new(credential: Credential) -> Self {
        Self {
            credential,
            timestamp: chrono::Utc::now(),
        }
    }
}

/// A single climate sensor sample.
#[derive(Debug, Clone, PartialEq)]
pub struct ClimateReading {
    /// Ambient temperature in degrees Celsius.
    pub temperature_c: f32,

    /// Relative humidity in percent.
    pub humidity_pct: f32,

    /// Timestamp when the sample was taken.
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl ClimateReading {
    /// Create a reading stamped with the current time.
    #[must_use]
    pub fn new(temperature_c: f32, humidity_pct: f32) -> Self {
        Self {
            temperature_c,
            humidity_pct,
            timestamp: chrono::Utc::now(),
        }
    }
}

/// Angular actuator abstraction (door servo).
///
/// A raw positional output: `set_angle` commands the shaft directly,
/// with no pacing. Smooth motion is layered on top by
/// [`SmoothServo`](crate::motion::SmoothServo), which is the only
/// caller in the agent; nothing else commands raw angles.
///
/// # Object Safety and Dynamic Dispatch
///
/// RPITIT methods are not object-safe, so `Box<dyn ServoDevice>` is not
/// available. Use generic type parameters, or the
/// [`AnyServoDevice`](crate::devices::AnyServoDevice) enum wrapper for
/// concrete dispatch.
pub trait ServoDevice: Send + Sync {
    /// Command the output shaft to `degrees`.
    ///
    /// The future must be `Send`: engine timer tasks await it off the
    /// caller's task.
    ///
    /// # Errors
    ///
    /// Returns an error if the device is disconnected or a
    /// communication error occurs.
    fn set_angle(&mut self, degrees: i16) -> impl Future<Output = Result<()>> + Send;

    /// Get device information.
    ///
    /// # Errors
    ///
    /// Returns an error if a communication error occurs while querying
    /// device information.
    fn info(&self) -> impl Future<Output = Result<DeviceInfo>> + Send;
}

/// Binary output abstraction (status light).
pub trait SwitchDevice: Send + Sync {
    /// Drive the output level: `true` lights the output.
    ///
    /// # Errors
    ///
    /// Returns an error if the device is disconnected or a
    /// communication error occurs.
    fn write(&mut self, on: bool) -> impl Future<Output = Result<()>> + Send;

    /// Get device information.
    ///
    /// # Errors
    ///
    /// Returns an error if a communication error occurs while querying
    /// device information.
    fn info(&self) -> impl Future<Output = Result<DeviceInfo>> + Send;
}

/// Edge-triggered local input (door button).
pub trait ButtonDevice: Send + Sync {
    /// Wait for the next press edge.
    ///
    /// Blocks asynchronously until a press is detected. Debounce is the
    /// caller's responsibility.
    ///
    /// # Errors
    ///
    /// Returns an error if the device is disconnected or a
    /// communication error occurs.
    fn wait_for_press(&mut self) -> impl Future<Output = Result<PressEvent>> + Send;

    /// Get device information.
    ///
    /// # Errors
    ///
    /// Returns an error if a communication error occurs while querying
    /// device information.
    fn info(&self) -> impl Future<Output = Result<DeviceInfo>> + Send;
}

/// Credential scanner abstraction (RFID/NFC reader).
pub trait ScannerDevice: Send + Sync {
    /// Read the next scanned credential.
    ///
    /// Blocks asynchronously until a tag is presented. Misreads surface
    /// as [`HardwareError::ReadError`](crate::HardwareError::ReadError)
    /// and are expected to be frequent; callers retry on the next
    /// attempt.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The tag could not be decoded (transient)
    /// - The device is disconnected
    fn read_credential(&mut self) -> impl Future<Output = Result<ScanEvent>> + Send;

    /// Get device information.
    ///
    /// # Errors
    ///
    /// Returns an error if a communication error occurs while querying
    /// device information.
    fn info(&self) -> impl Future<Output = Result<DeviceInfo>> + Send;
}

/// Temperature/humidity sensor abstraction.
///
/// The reference sensor rejects back-to-back reads, so `sample` fails
/// transiently and often; callers skip to the next scheduled interval
/// instead of retrying immediately.
pub trait ClimateDevice: Send + Sync {
    /// Take one temperature/humidity sample.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The sensor was not ready for another read (transient)
    /// - The device is disconnected
    fn sample(&mut self) -> impl Future<Output = Result<ClimateReading>> + Send;

    /// Get device information.
    ///
    /// # Errors
    ///
    /// Returns an error if a communication error occurs while querying
    /// device information.
    fn info(&self) -> impl Future<Output = Result<DeviceInfo>> + Send;
}
