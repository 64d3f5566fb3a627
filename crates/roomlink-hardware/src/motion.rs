//! Smooth motion profile for the angular actuator.
//!
//! Commanding a hobby servo straight to its target makes the attached
//! door panel snap. [`SmoothServo`] wraps a raw [`ServoDevice`] and
//! sweeps one degree at a time with a fixed pause between steps, so the
//! panel moves calmly. It also owns the remembered shaft position: the
//! engines never track angles themselves and never command the raw
//! device directly.

use crate::error::Result;
use crate::traits::ServoDevice;
use std::time::Duration;

/// Paced unit-step wrapper around a raw angular actuator.
///
/// The remembered angle is committed only after a sweep completes, so a
/// caller that holds the wrapper behind a lock never observes a torn
/// intermediate position.
///
/// # Examples
///
/// ```no_run
/// use roomlink_hardware::mock::MockServo;
/// use roomlink_hardware::motion::SmoothServo;
/// use std::time::Duration;
///
/// # async fn example() -> roomlink_hardware::Result<()> {
/// let (servo, _handle) = MockServo::new();
/// let mut drive = SmoothServo::new(servo, 0, Duration::from_millis(30));
/// drive.move_to(90).await?;
/// assert_eq!(drive.angle(), 90);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SmoothServo<S> {
    servo: S,
    angle: i16,
    step_delay: Duration,
}

impl<S: ServoDevice> SmoothServo<S> {
    /// Wrap `servo`, assuming its shaft currently rests at
    /// `initial_angle`.
    ///
    /// The first sweep starts from that assumption; on a cold boot the
    /// agent constructs the drive at the closed angle.
    pub fn new(servo: S, initial_angle: i16, step_delay: Duration) -> Self {
        Self {
            servo,
            angle: initial_angle,
            step_delay,
        }
    }

    /// The last committed shaft angle in degrees.
    #[must_use]
    pub fn angle(&self) -> i16 {
        self.angle
    }

    /// Access the wrapped device.
    pub fn device(&self) -> &S {
        &self.servo
    }

    /// Sweep the shaft to `target`, one degree per step.
    ///
    /// A no-op when the shaft already rests at `target`. The remembered
    /// angle is updated once the full sweep has completed.
    ///
    /// # Errors
    ///
    /// Propagates the first device error; the remembered angle then
    /// still holds the previous committed position.
    pub async fn move_to(&mut self, target: i16) -> Result<()> {
        if target == self.angle {
            return Ok(());
        }

        let step: i16 = if target > self.angle { 1 } else { -1 };
        let mut position = self.angle;
        while position != target {
            position += step;
            self.servo.set_angle(position).await?;
            tokio::time::sleep(self.step_delay).await;
        }

        self.angle = target;
        Ok(())
    }
}
