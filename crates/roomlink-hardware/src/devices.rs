//! Enum wrappers for peripheral device dispatch.
//!
//! Native async trait methods (RPITIT) are not object-safe, so
//! `Box<dyn ServoDevice>` is unavailable. These enum wrappers provide
//! concrete type dispatch at compile time instead: zero-cost
//! abstraction, type-safe extensibility, and a clear slot for
//! feature-gated hardware backends.
//!
//! Real GPIO/I2C backends are reserved behind the `hardware-gpio` and
//! `hardware-i2c` features; today every wrapper carries the mock
//! implementation used for development and emulated deployments.
//!
//! # Examples
//!
//! ```
//! use roomlink_hardware::devices::AnyServoDevice;
//! use roomlink_hardware::mock::MockServo;
//! use roomlink_hardware::traits::ServoDevice;
//!
//! #[tokio::main]
//! async fn main() -> roomlink_hardware::Result<()> {
//!     let (servo, _handle) = MockServo::new();
//!     let mut any_servo = AnyServoDevice::Mock(servo);
//!
//!     any_servo.set_angle(45).await?;
//!     Ok(())
//! }
//! ```

use crate::mock::{MockButton, MockClimate, MockScanner, MockServo, MockSwitch};
use crate::traits::{
    ButtonDevice, ClimateDevice, ClimateReading, PressEvent, ScanEvent, ScannerDevice,
    ServoDevice, SwitchDevice,
};
use crate::{DeviceInfo, Result};

/// Enum wrapper for angular actuator dispatch.
#[derive(Debug)]
#[non_exhaustive]
pub enum AnyServoDevice {
    /// Mock servo for development and testing.
    Mock(MockServo),
}

impl ServoDevice for AnyServoDevice {
    async fn set_angle(&mut self, degrees: i16) -> Result<()> {
        match self {
            Self::Mock(device) => device.set_angle(degrees).await,
        }
    }

    async fn info(&self) -> Result<DeviceInfo> {
        match self {
            Self::Mock(device) => device.info().await,
        }
    }
}

/// Enum wrapper for binary output dispatch.
#[derive(Debug)]
#[non_exhaustive]
pub enum AnySwitchDevice {
    /// Mock switch for development and testing.
    Mock(MockSwitch),
}

impl SwitchDevice for AnySwitchDevice {
    async fn write(&mut self, on: bool) -> Result<()> {
        match self {
            Self::Mock(device) => device.write(on).await,
        }
    }

    async fn info(&self) -> Result<DeviceInfo> {
        match self {
            Self::Mock(device) => device.info().await,
        }
    }
}

/// Enum wrapper for door button dispatch.
#[derive(Debug)]
#[non_exhaustive]
pub enum AnyButtonDevice {
    /// Mock button for development and testing.
    Mock(MockButton),
}

impl ButtonDevice for AnyButtonDevice {
    async fn wait_for_press(&mut self) -> Result<PressEvent> {
        match self {
            Self::Mock(device) => device.wait_for_press().await,
        }
    }

    async fn info(&self) -> Result<DeviceInfo> {
        match self {
            Self::Mock(device) => device.info().await,
        }
    }
}

/// Enum wrapper for credential scanner dispatch.
#[derive(Debug)]
#[non_exhaustive]
pub enum AnyScannerDevice {
    /// Mock scanner for development and testing.
    Mock(MockScanner),
}

impl ScannerDevice for AnyScannerDevice {
    async fn read_credential(&mut self) -> Result<ScanEvent> {
        match self {
            Self::Mock(device) => device.read_credential().await,
        }
    }

    async fn info(&self) -> Result<DeviceInfo> {
        match self {
            Self::Mock(device) => device.info().await,
        }
    }
}

/// Enum wrapper for climate sensor dispatch.
#[derive(Debug)]
#[non_exhaustive]
pub enum AnyClimateDevice {
    /// Mock sensor for development and testing.
    Mock(MockClimate),
}

impl ClimateDevice for AnyClimateDevice {
    async fn sample(&mut self) -> Result<ClimateReading> {
        match self {
            Self::Mock(device) => device.sample().await,
        }
    }

    async fn info(&self) -> Result<DeviceInfo> {
        match self {
            Self::Mock(device) => device.info().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomlink_core::Credential;

    #[tokio::test]
    async fn test_servo_dispatch() {
        let (servo, handle) = MockServo::new();
        let mut any_servo = AnyServoDevice::Mock(servo);

        any_servo.set_angle(12).await.unwrap();
        assert_eq!(handle.angles(), vec![12]);
    }

    #[tokio::test]
    async fn test_scanner_dispatch() {
        let (scanner, handle) = MockScanner::new();
        let mut any_scanner = AnyScannerDevice::Mock(scanner);

        handle.present(Credential::new(7)).await.unwrap();
        let scan = any_scanner.read_credential().await.unwrap();
        assert_eq!(scan.credential.value(), 7);
    }
}
