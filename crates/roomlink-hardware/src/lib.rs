//! Peripheral abstraction layer for the room edge agent.
//!
//! Defines the trait seams between the reconciliation engines and the
//! physical hardware (door servo, status light, button, credential
//! scanner, climate sensor), the smooth motion profile for the door
//! actuator, programmable mock devices, and enum dispatch wrappers.

pub mod devices;
pub mod error;
pub mod mock;
pub mod motion;
pub mod traits;
pub mod types;

pub use error::{HardwareError, Result};
pub use motion::SmoothServo;
pub use traits::{
    ButtonDevice, ClimateDevice, ClimateReading, PressEvent, ScanEvent, ScannerDevice,
    ServoDevice, SwitchDevice,
};
pub use types::DeviceInfo;
