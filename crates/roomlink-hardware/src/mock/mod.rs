//! Mock device implementations for testing and development.
//!
//! This module provides simulated device implementations that can be
//! controlled programmatically without requiring physical hardware.

pub mod button;
pub mod climate;
pub mod scanner;
pub mod servo;
pub mod switch;

// Re-export commonly used types
pub use button::{MockButton, MockButtonHandle};
pub use climate::{MockClimate, MockClimateHandle};
pub use scanner::{MockScanner, MockScannerHandle};
pub use servo::{MockServo, MockServoHandle};
pub use switch::{MockSwitch, MockSwitchHandle};
