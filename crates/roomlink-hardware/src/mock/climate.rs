//! Mock temperature/humidity sensor for testing and development.

use crate::{
    HardwareError, Result,
    traits::{ClimateDevice, ClimateReading},
    types::DeviceInfo,
};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

/// Internal event type for the mock climate sensor.
#[derive(Debug, Clone)]
enum SampleOutcome {
    Reading(ClimateReading),
    Failure,
}

/// Mock temperature/humidity sensor.
///
/// Readings and failures are queued through the paired handle. A sample
/// taken while the queue is empty fails transiently, mirroring a real
/// sensor that is not ready for another read; callers are expected to
/// skip to their next scheduled interval.
#[derive(Debug)]
pub struct MockClimate {
    /// Channel receiver for queued samples
    event_rx: mpsc::Receiver<SampleOutcome>,

    /// Device name
    name: String,
}

impl MockClimate {
    /// Create a new mock climate sensor with the default name.
    pub fn new() -> (Self, MockClimateHandle) {
        Self::with_name("Mock Climate Sensor".to_string())
    }

    /// Create a new mock climate sensor with a custom name.
    pub fn with_name(name: String) -> (Self, MockClimateHandle) {
        let (event_tx, event_rx) = mpsc::channel(16);
        let sensor = Self {
            event_rx,
            name: name.clone(),
        };
        (sensor, MockClimateHandle { event_tx, name })
    }
}

impl ClimateDevice for MockClimate {
    async fn sample(&mut self) -> Result<ClimateReading> {
        match self.event_rx.try_recv() {
            Ok(SampleOutcome::Reading(reading)) => Ok(reading),
            Ok(SampleOutcome::Failure) => Err(HardwareError::read("sensor checksum failure")),
            Err(TryRecvError::Empty) => Err(HardwareError::read("sensor not ready")),
            Err(TryRecvError::Disconnected) => {
                Err(HardwareError::disconnected("climate event channel closed"))
            }
        }
    }

    async fn info(&self) -> Result<DeviceInfo> {
        Ok(DeviceInfo::new(self.name.clone(), "Mock DHT sensor"))
    }
}

/// Control handle for [`MockClimate`].
#[derive(Debug, Clone)]
pub struct MockClimateHandle {
    event_tx: mpsc::Sender<SampleOutcome>,
    name: String,
}

impl MockClimateHandle {
    /// Queue a reading for the next sample.
    ///
    /// # Errors
    ///
    /// Returns `Disconnected` if the device side has been dropped.
    pub async fn submit(&self, temperature_c: f32, humidity_pct: f32) -> Result<()> {
        self.send(SampleOutcome::Reading(ClimateReading::new(
            temperature_c,
            humidity_pct,
        )))
        .await
    }

    /// Queue a failed read for the next sample.
    ///
    /// # Errors
    ///
    /// Returns `Disconnected` if the device side has been dropped.
    pub async fn fail(&self) -> Result<()> {
        self.send(SampleOutcome::Failure).await
    }

    async fn send(&self, outcome: SampleOutcome) -> Result<()> {
        self.event_tx
            .send(outcome)
            .await
            .map_err(|_| HardwareError::disconnected(self.name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_submitted_reading_is_sampled() {
        let (mut sensor, handle) = MockClimate::new();

        handle.submit(22.5, 51.0).await.unwrap();
        let reading = sensor.sample().await.unwrap();
        assert_eq!(reading.temperature_c, 22.5);
        assert_eq!(reading.humidity_pct, 51.0);
    }

    #[tokio::test]
    async fn test_empty_queue_fails_transiently() {
        let (mut sensor, _handle) = MockClimate::new();

        let result = sensor.sample().await;
        match result {
            Err(e) => assert!(e.is_transient()),
            Ok(_) => panic!("sample should fail while queue is empty"),
        }
    }

    #[tokio::test]
    async fn test_queued_failure() {
        let (mut sensor, handle) = MockClimate::new();

        handle.fail().await.unwrap();
        assert!(sensor.sample().await.is_err());

        // A good reading queued afterwards still comes through.
        handle.submit(20.0, 40.0).await.unwrap();
        assert!(sensor.sample().await.is_ok());
    }

    #[tokio::test]
    async fn test_dropped_handle_disconnects() {
        let (mut sensor, handle) = MockClimate::new();
        drop(handle);

        let result = sensor.sample().await;
        assert!(matches!(result, Err(HardwareError::Disconnected { .. })));
    }
}
