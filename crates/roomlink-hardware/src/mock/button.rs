//! Mock door button for testing and development.

use crate::{
    HardwareError, Result,
    traits::{ButtonDevice, PressEvent},
    types::DeviceInfo,
};
use tokio::sync::mpsc;

/// Mock door button.
///
/// Press edges are injected through the paired handle; the device side
/// blocks on [`ButtonDevice::wait_for_press`] until one arrives.
///
/// # Examples
///
/// ```
/// use roomlink_hardware::mock::MockButton;
/// use roomlink_hardware::traits::ButtonDevice;
///
/// #[tokio::main]
/// async fn main() -> roomlink_hardware::Result<()> {
///     let (mut button, handle) = MockButton::new();
///
///     handle.press().await?;
///     let event = button.wait_for_press().await?;
///     println!("pressed at {}", event.timestamp);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockButton {
    /// Channel receiver for press events
    event_rx: mpsc::Receiver<PressEvent>,

    /// Device name
    name: String,
}

impl MockButton {
    /// Create a new mock button with the default name.
    pub fn new() -> (Self, MockButtonHandle) {
        Self::with_name("Mock Button".to_string())
    }

    /// Create a new mock button with a custom name.
    pub fn with_name(name: String) -> (Self, MockButtonHandle) {
        let (event_tx, event_rx) = mpsc::channel(8);
        let button = Self {
            event_rx,
            name: name.clone(),
        };
        (button, MockButtonHandle { event_tx, name })
    }
}

impl ButtonDevice for MockButton {
    async fn wait_for_press(&mut self) -> Result<PressEvent> {
        self.event_rx
            .recv()
            .await
            .ok_or_else(|| HardwareError::disconnected("button event channel closed"))
    }

    async fn info(&self) -> Result<DeviceInfo> {
        Ok(DeviceInfo::new(self.name.clone(), "Mock push button"))
    }
}

/// Control handle for [`MockButton`].
#[derive(Debug, Clone)]
pub struct MockButtonHandle {
    event_tx: mpsc::Sender<PressEvent>,
    name: String,
}

impl MockButtonHandle {
    /// Simulate a press edge.
    ///
    /// # Errors
    ///
    /// Returns `Disconnected` if the device side has been dropped.
    pub async fn press(&self) -> Result<()> {
        self.event_tx
            .send(PressEvent::now())
            .await
            .map_err(|_| HardwareError::disconnected(self.name.clone()))
    }
}
