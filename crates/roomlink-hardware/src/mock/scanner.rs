//! Mock credential scanner for testing and development.

use crate::{
    HardwareError, Result,
    traits::{ScanEvent, ScannerDevice},
    types::DeviceInfo,
};
use roomlink_core::Credential;
use tokio::sync::mpsc;

/// Internal event type for the mock scanner.
#[derive(Debug, Clone)]
enum ScanOutcome {
    /// A tag was presented and decoded.
    Presented(ScanEvent),

    /// A tag was presented but could not be decoded.
    Misread,
}

/// Mock credential scanner.
///
/// Scans and misreads are injected through the paired handle; the
/// device side blocks on [`ScannerDevice::read_credential`] until one
/// arrives.
///
/// # Examples
///
/// ```
/// use roomlink_core::Credential;
/// use roomlink_hardware::mock::MockScanner;
/// use roomlink_hardware::traits::ScannerDevice;
///
/// #[tokio::main]
/// async fn main() -> roomlink_hardware::Result<()> {
///     let (mut scanner, handle) = MockScanner::new();
///
///     handle.present(Credential::new(756_402_188_501)).await?;
///     let scan = scanner.read_credential().await?;
///     assert_eq!(scan.credential.value(), 756_402_188_501);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct MockScanner {
    /// Channel receiver for scan events
    event_rx: mpsc::Receiver<ScanOutcome>,

    /// Device name
    name: String,
}

impl MockScanner {
    /// Create a new mock scanner with the default name.
    pub fn new() -> (Self, MockScannerHandle) {
        Self::with_name("Mock Scanner".to_string())
    }

    /// Create a new mock scanner with a custom name.
    pub fn with_name(name: String) -> (Self, MockScannerHandle) {
        let (event_tx, event_rx) = mpsc::channel(8);
        let scanner = Self {
            event_rx,
            name: name.clone(),
        };
        (scanner, MockScannerHandle { event_tx, name })
    }
}

impl ScannerDevice for MockScanner {
    async fn read_credential(&mut self) -> Result<ScanEvent> {
        let outcome = self
            .event_rx
            .recv()
            .await
            .ok_or_else(|| HardwareError::disconnected("scanner event channel closed"))?;

        match outcome {
            ScanOutcome::Presented(scan) => Ok(scan),
            ScanOutcome::Misread => Err(HardwareError::read("tag could not be decoded")),
        }
    }

    async fn info(&self) -> Result<DeviceInfo> {
        Ok(DeviceInfo::new(self.name.clone(), "Mock RFID reader"))
    }
}

/// Control handle for [`MockScanner`].
#[derive(Debug, Clone)]
pub struct MockScannerHandle {
    event_tx: mpsc::Sender<ScanOutcome>,
    name: String,
}

impl MockScannerHandle {
    /// Simulate presenting a tag with the given credential.
    ///
    /// # Errors
    ///
    /// Returns `Disconnected` if the device side has been dropped.
    pub async fn present(&self, credential: Credential) -> Result<()> {
        self.send(ScanOutcome::Presented(ScanEvent::new(credential)))
            .await
    }

    /// Simulate a tag presentation that fails to decode.
    ///
    /// # Errors
    ///
    /// Returns `Disconnected` if the device side has been dropped.
    pub async fn misread(&self) -> Result<()> {
        self.send(ScanOutcome::Misread).await
    }

    async fn send(&self, outcome: ScanOutcome) -> Result<()> {
        self.event_tx
            .send(outcome)
            .await
            .map_err(|_| HardwareError::disconnected(self.name.clone()))
    }
}
