//! Mock binary output for testing and development.

use crate::{
    Result,
    traits::SwitchDevice,
    types::DeviceInfo,
};
use std::sync::{Arc, Mutex};

/// Mock binary output (status light).
///
/// Records every level write so tests can assert on toggle and blink
/// sequences.
#[derive(Debug)]
pub struct MockSwitch {
    /// Device name
    name: String,

    /// Level write trace, shared with the handle
    writes: Arc<Mutex<Vec<bool>>>,
}

impl MockSwitch {
    /// Create a new mock switch with the default name.
    pub fn new() -> (Self, MockSwitchHandle) {
        Self::with_name("Mock Switch".to_string())
    }

    /// Create a new mock switch with a custom name.
    pub fn with_name(name: String) -> (Self, MockSwitchHandle) {
        let writes = Arc::new(Mutex::new(Vec::new()));
        let switch = Self {
            name,
            writes: Arc::clone(&writes),
        };
        (switch, MockSwitchHandle { writes })
    }
}

impl Default for MockSwitch {
    fn default() -> Self {
        Self::new().0
    }
}

impl SwitchDevice for MockSwitch {
    async fn write(&mut self, on: bool) -> Result<()> {
        self.writes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(on);
        Ok(())
    }

    async fn info(&self) -> Result<DeviceInfo> {
        Ok(DeviceInfo::new(self.name.clone(), "Mock binary output"))
    }
}

/// Inspection handle for [`MockSwitch`].
#[derive(Debug, Clone)]
pub struct MockSwitchHandle {
    writes: Arc<Mutex<Vec<bool>>>,
}

impl MockSwitchHandle {
    /// Every level written so far, in order.
    pub fn levels(&self) -> Vec<bool> {
        self.writes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// The currently driven level (`false` before any write).
    pub fn is_on(&self) -> bool {
        self.writes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .copied()
            .unwrap_or(false)
    }

    /// Number of level writes so far.
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
    async fn test_records_levels() {
        let (mut switch, handle) = MockSwitch::new();

        switch.write(true).await.unwrap();
        switch.write(false).await.unwrap();
        switch.write(true).await.unwrap();

        assert_eq!(handle.levels(), vec![true, false, true]);
        assert!(handle.is_on());
    }

    #[tokio::test]
    async fn test_starts_off() {
        let (_switch, handle) = MockSwitch::new();
        assert!(!handle.is_on());
        assert_eq!(handle.write_count(), 0);
    }
}
