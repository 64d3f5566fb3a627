//! Core constants for the room edge agent.
//!
//! This module centralizes the canonical defaults and hard limits used
//! across the agent: actuator angles and motion pacing, safety timer
//! delays, backend timing, and input debounce intervals. Configuration
//! may override most of these within the documented bounds; the bounds
//! themselves are fixed here so every crate validates against the same
//! numbers.

// ============================================================================
// Actuator Angles
// ============================================================================

/// Default shaft angle for the fully open door (degrees).
///
/// # Examples
///
/// ```
/// use roomlink_core::constants::{DEFAULT_OPEN_ANGLE, DEFAULT_CLOSED_ANGLE};
///
/// assert_ne!(DEFAULT_OPEN_ANGLE, DEFAULT_CLOSED_ANGLE);
/// ```
pub const DEFAULT_OPEN_ANGLE: i16 = 90;

/// Default shaft angle for the fully closed door (degrees).
pub const DEFAULT_CLOSED_ANGLE: i16 = 0;

/// Minimum angle the angular actuator can be commanded to (degrees).
///
/// Matches the mechanical range of the common hobby-class servo used
/// on the reference hardware.
pub const MIN_ANGLE: i16 = -90;

/// Maximum angle the angular actuator can be commanded to (degrees).
pub const MAX_ANGLE: i16 = 90;

// ============================================================================
// Motion Pacing
// ============================================================================

/// Default pause between single-degree actuator steps (milliseconds).
///
/// The door sweeps one degree at a time with this pause between steps
/// so the physical panel moves calmly instead of snapping. Lower values
/// move faster; values outside the min/max bounds are rejected by
/// configuration validation.
pub const DEFAULT_STEP_DELAY_MS: u64 = 30;

/// Minimum allowed per-step pause (milliseconds).
///
/// Below this the sweep degenerates into a snap and defeats the point
/// of the motion profile.
pub const MIN_STEP_DELAY_MS: u64 = 5;

/// Maximum allowed per-step pause (milliseconds).
///
/// A 90 degree sweep at this pace already takes over 20 seconds; anything
/// slower is a misconfiguration.
pub const MAX_STEP_DELAY_MS: u64 = 250;

// ============================================================================
// Safety Timers
// ============================================================================

/// Default delay before an opened door closes itself (seconds).
///
/// A door left open is closed automatically after this delay unless an
/// intervening close cancels the timer. Observed deployments use 10 to
/// 12 seconds.
pub const DEFAULT_AUTO_CLOSE_SECS: u64 = 10;

// ============================================================================
// Backend Timing
// ============================================================================

/// Default interval between remote status polls (milliseconds).
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 3000;

/// Default timeout for a single state push to the backend (seconds).
///
/// Pushes are best-effort; when this timeout elapses the push is
/// abandoned for the cycle, never retried inline.
pub const DEFAULT_PUSH_TIMEOUT_SECS: u64 = 5;

/// Minimum allowed push timeout (seconds).
pub const MIN_PUSH_TIMEOUT_SECS: u64 = 2;

/// Maximum allowed push timeout (seconds).
pub const MAX_PUSH_TIMEOUT_SECS: u64 = 10;

/// Default interval between climate sensor samples (seconds).
///
/// The sensor rejects back-to-back reads, so a failed sample is skipped
/// until the next interval rather than retried immediately.
pub const DEFAULT_CLIMATE_INTERVAL_SECS: u64 = 30;

// ============================================================================
// Input Debounce
// ============================================================================

/// Pause after handling a button press (milliseconds).
///
/// Absorbs contact bounce and accidental double presses.
pub const DEFAULT_BUTTON_DEBOUNCE_MS: u64 = 500;

/// Pause after each credential read attempt (milliseconds).
///
/// A card held against the reader produces repeated detections; this
/// pause keeps one presentation from registering as several scans.
pub const DEFAULT_SCAN_DEBOUNCE_MS: u64 = 1500;

// ============================================================================
// Denial Feedback
// ============================================================================

/// Number of on/off repetitions of the denial blink.
pub const DENY_BLINK_COUNT: u32 = 3;

/// Interval between denial blink edges (milliseconds).
pub const DENY_BLINK_INTERVAL_MS: u64 = 100;
