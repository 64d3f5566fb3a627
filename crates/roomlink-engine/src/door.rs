//! Door reconciliation engine.
//!
//! Owns the authoritative answer to "is the door open or closed" and
//! everything that may change it: the smooth actuator sweep, the
//! auto-close safety timer, and the best-effort push of every change to
//! the remote store. Three independent command sources (button,
//! credential gate, remote poll) call into the same engine handle; a
//! single engine-wide lock serializes them so two sources can never
//! drive the actuator at the same time.
//!
//! # Timer discipline
//!
//! At most one auto-close timer is pending per engine. Arming replaces
//! any previous timer (last-open-wins) by bumping a generation counter
//! and aborting the superseded task; a firing timer re-checks its
//! generation under the engine lock, so a stale timer never closes the
//! door and a timer-driven close never cancels itself mid-sweep.

use roomlink_core::{DeviceKind, DeviceState};
use roomlink_hardware::{Result, ServoDevice, SmoothServo};
use roomlink_sync::RemoteStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};

/// Motion and safety parameters for one door.
#[derive(Debug, Clone, Copy)]
pub struct DoorProfile {
    /// Shaft angle of the fully open door (degrees).
    pub open_angle: i16,

    /// Shaft angle of the fully closed door (degrees).
    pub closed_angle: i16,

    /// Delay before an opened door closes itself.
    pub auto_close: Duration,
}

impl DoorProfile {
    /// Create a profile with validated angles.
    ///
    /// # Errors
    /// Returns an error if either angle is outside the mechanical range
    /// or the two angles coincide.
    pub fn new(
        open_angle: i16,
        closed_angle: i16,
        auto_close: Duration,
    ) -> roomlink_core::Result<Self> {
        roomlink_core::validate_angle(open_angle)?;
        roomlink_core::validate_angle(closed_angle)?;
        if open_angle == closed_angle {
            return Err(roomlink_core::Error::Config(
                "open and closed angles must differ".to_string(),
            ));
        }
        Ok(Self {
            open_angle,
            closed_angle,
            auto_close,
        })
    }
}

impl Default for DoorProfile {
    fn default() -> Self {
        Self {
            open_angle: roomlink_core::constants::DEFAULT_OPEN_ANGLE,
            closed_angle: roomlink_core::constants::DEFAULT_CLOSED_ANGLE,
            auto_close: Duration::from_secs(roomlink_core::constants::DEFAULT_AUTO_CLOSE_SECS),
        }
    }
}

struct DoorInner<S, R> {
    drive: SmoothServo<S>,
    state: DeviceState,
    profile: DoorProfile,
    store: Arc<R>,
    timer_generation: u64,
    auto_close: Option<AbortHandle>,
}

impl<S, R> DoorInner<S, R> {
    /// Invalidate any pending auto-close timer.
    fn disarm(&mut self) {
        self.timer_generation = self.timer_generation.wrapping_add(1);
        if let Some(handle) = self.auto_close.take() {
            handle.abort();
        }
    }
}

/// Cloneable handle to the door reconciliation engine.
///
/// All clones share one state and one lock. The door always boots
/// closed; whatever the backend believed before the restart is ignored
/// until the first poll reconciles it.
pub struct DoorEngine<S, R> {
    inner: Arc<Mutex<DoorInner<S, R>>>,
}

impl<S, R> Clone for DoorEngine<S, R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S, R> DoorEngine<S, R>
where
    S: ServoDevice + 'static,
    R: RemoteStore + 'static,
{
    /// Create an engine over a seated drive.
    ///
    /// `drive` is expected to rest at the profile's closed angle; the
    /// engine starts in the closed state regardless of any remote
    /// belief.
    pub fn new(drive: SmoothServo<S>, store: Arc<R>, profile: DoorProfile) -> Self {
        Self {
            inner: Arc::new(Mutex::new(DoorInner {
                drive,
                state: DeviceState::Off,
                profile,
                store,
                timer_generation: 0,
                auto_close: None,
            })),
        }
    }

    /// Open the door. No-op when already open.
    ///
    /// On an actual transition the actuator sweeps to the open angle,
    /// the change is pushed to the remote store on its own task, and
    /// the auto-close timer is armed (replacing any pending one).
    ///
    /// Returns `true` if the door actually moved.
    pub async fn open(&self) -> Result<bool> {
        let mut inner = self.inner.lock().await;
        self.apply(&mut inner, DeviceState::On).await
    }

    /// Close the door. No-op when already closed.
    ///
    /// Cancels any pending auto-close before the sweep, so a manual or
    /// remote close never races a timer-driven one.
    ///
    /// Returns `true` if the door actually moved.
    pub async fn close(&self) -> Result<bool> {
        let mut inner = self.inner.lock().await;
        self.apply(&mut inner, DeviceState::Off).await
    }

    /// Flip the door state atomically under the engine lock.
    ///
    /// Returns the state the door ended up in.
    pub async fn toggle(&self) -> Result<DeviceState> {
        let mut inner = self.inner.lock().await;
        let target = inner.state.toggled();
        self.apply(&mut inner, target).await?;
        Ok(target)
    }

    /// Apply the backend's belief about the door.
    ///
    /// Acts only when `remote` disagrees with local state; an agreeing
    /// poll causes no motion and no push. The correction path is the
    /// ordinary open/close path, so a poll-driven change pushes back to
    /// the backend, which is harmless because pushes are idempotent.
    ///
    /// Returns `true` if a correction was applied.
    pub async fn reconcile(&self, remote: DeviceState) -> Result<bool> {
        let mut inner = self.inner.lock().await;
        if inner.state == remote {
            return Ok(false);
        }
        info!(local = %inner.state, %remote, "applying remote door correction");
        self.apply(&mut inner, remote).await
    }

    /// Current door state.
    pub async fn state(&self) -> DeviceState {
        self.inner.lock().await.state
    }

    /// Last committed actuator angle in degrees.
    pub async fn angle(&self) -> i16 {
        self.inner.lock().await.drive.angle()
    }

    async fn apply(&self, inner: &mut DoorInner<S, R>, target: DeviceState) -> Result<bool> {
        if inner.state == target {
            debug!(state = %target, "door already in requested state");
            return Ok(false);
        }

        match target {
            DeviceState::On => {
                let open_angle = inner.profile.open_angle;
                inner.drive.move_to(open_angle).await?;
                inner.state = DeviceState::On;
                info!(angle = open_angle, "door opened");
                Self::dispatch_push(inner, DeviceState::On);
                self.arm_auto_close(inner);
            }
            DeviceState::Off => {
                inner.disarm();
                let closed_angle = inner.profile.closed_angle;
                inner.drive.move_to(closed_angle).await?;
                inner.state = DeviceState::Off;
                info!(angle = closed_angle, "door closed");
                Self::dispatch_push(inner, DeviceState::Off);
            }
        }

        Ok(true)
    }

    /// Record the new state upstream without delaying the caller.
    ///
    /// The push runs on its own task; a slow or dead backend never
    /// holds the engine lock or the actuation path.
    fn dispatch_push(inner: &DoorInner<S, R>, state: DeviceState) {
        let store = Arc::clone(&inner.store);
        tokio::spawn(async move {
            let outcome = store.push(DeviceKind::Door, state.as_str()).await;
            if !outcome.is_delivered() {
                debug!(%state, %outcome, "door state push not delivered");
            }
        });
    }

    fn arm_auto_close(&self, inner: &mut DoorInner<S, R>) {
        inner.disarm();
        let generation = inner.timer_generation;
        let delay = inner.profile.auto_close;
        let engine = self.clone();

        debug!(delay_secs = delay.as_secs(), "auto-close armed");
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            engine.fire_auto_close(generation).await;
        });
        inner.auto_close = Some(handle.abort_handle());
    }

    async fn fire_auto_close(&self, generation: u64) {
        let mut inner = self.inner.lock().await;
        if inner.timer_generation != generation {
            debug!("auto-close superseded, ignoring");
            return;
        }

        // This task owns the pending slot; clear it before applying so
        // the close path has nothing left to abort.
        inner.auto_close = None;
        info!("auto-close delay elapsed, closing door");
        if let Err(e) = self.apply(&mut inner, DeviceState::Off).await {
            warn!(error = %e, "auto-close failed to drive the door");
        }
    }
}
