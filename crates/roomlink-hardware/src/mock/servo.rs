//! Mock angular actuator for testing and development.

use crate::{
    Result,
    traits::ServoDevice,
    types::DeviceInfo,
};
use std::sync::{Arc, Mutex};

/// Mock angular actuator.
///
/// Records every commanded angle so tests can assert on the exact
/// motion trace a caller produced.
///
/// # Examples
///
/// ```
/// use roomlink_hardware::mock::MockServo;
/// use roomlink_hardware::traits::ServoDevice;
///
/// #[tokio::main]
/// async fn main() -> roomlink_hardware::Result<()> {
///     let (mut servo, handle) = MockServo::new();
///
///     servo.set_angle(30).await?;
///     servo.set_angle(31).await?;
///
///     assert_eq!(handle.angles(), vec![30, 31]);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockServo {
    /// Device name
    name: String,

    /// Commanded angle trace, shared with the handle
    writes: Arc<Mutex<Vec<i16>>>,
}

impl MockServo {
    /// Create a new mock servo with the default name.
    ///
    /// Returns a tuple of (MockServo, MockServoHandle) where the handle
    /// can be used to inspect the commanded angle trace.
    pub fn new() -> (Self, MockServoHandle) {
        Self::with_name("Mock Servo".to_string())
    }

    /// Create a new mock servo with a custom name.
    pub fn with_name(name: String) -> (Self, MockServoHandle) {
        let writes = Arc::new(Mutex::new(Vec::new()));
        let servo = Self {
            name,
            writes: Arc::clone(&writes),
        };
        (servo, MockServoHandle { writes })
    }
}

impl Default for MockServo {
    fn default() -> Self {
        Self::new().0
    }
}

impl ServoDevice for MockServo {
    async fn set_angle(&mut self, degrees: i16) -> Result<()> {
        self.writes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(degrees);
        Ok(())
    }

    async fn info(&self) -> Result<DeviceInfo> {
        Ok(DeviceInfo::new(self.name.clone(), "Mock angular actuator"))
    }
}

/// Inspection handle for [`MockServo`].
#[derive(Debug, Clone)]
pub struct MockServoHandle {
    writes: Arc<Mutex<Vec<i16>>>,
}

impl MockServoHandle {
    /// Every angle commanded so far, in order.
    pub fn angles(&self) -> Vec<i16> {
        self.writes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// The most recently commanded angle, if any.
    pub fn last_angle(&self) -> Option<i16> {
        self.writes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .copied()
    }

    /// Number of raw angle writes so far.
    pub fn write_count(&self) -> usize {
        self.writes.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Forget the recorded trace.
    pub fn clear(&self) {
        self.writes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_commanded_angles() {
        let (mut servo, handle) = MockServo::new();

        servo.set_angle(10).await.unwrap();
        servo.set_angle(-10).await.unwrap();

        assert_eq!(handle.angles(), vec![10, -10]);
        assert_eq!(handle.last_angle(), Some(-10));
        assert_eq!(handle.write_count(), 2);
    }

    #[tokio::test]
    async fn test_clear_resets_trace() {
        let (mut servo, handle) = MockServo::new();
        servo.set_angle(5).await.unwrap();

        handle.clear();

        assert!(handle.angles().is_empty());
        assert_eq!(handle.last_angle(), None);
    }

    #[tokio::test]
    async fn test_info() {
        let (servo, _handle) = MockServo::with_name("door servo".to_string());
        let info = servo.info().await.unwrap();
        assert_eq!(info.name, "door servo");
    }
}
