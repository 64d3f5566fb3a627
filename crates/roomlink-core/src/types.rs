use crate::{
    Result,
    constants::{MAX_ANGLE, MIN_ANGLE},
    error::Error,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use subtle::ConstantTimeEq;

/// Room identifier scoping every remote call.
///
/// Configured once at startup and immutable afterwards. The backend
/// numbers rooms from 1, so zero is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(u32);

impl RoomId {
    /// Create a new room id with validation.
    ///
    /// # Errors
    /// Returns `Error::InvalidRoomId` if the id is zero.
    pub fn new(id: u32) -> Result<Self> {
        if id == 0 {
            return Err(Error::InvalidRoomId(
                "room id must be greater than zero".to_string(),
            ));
        }
        Ok(RoomId(id))
    }

    /// Get the raw room id as u32.
    #[must_use]
    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RoomId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let id: u32 = s
            .parse()
            .map_err(|_| Error::InvalidRoomId(format!("Invalid room id: {s}")))?;
        RoomId::new(id)
    }
}

/// Kind of device the backend tracks for a room.
///
/// `Door` and `Light` are actuated locally; `Temperature` and
/// `Humidity` are telemetry-only and never reconciled back into
/// hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Door,
    Light,
    Temperature,
    Humidity,
}

impl DeviceKind {
    /// Wire name of the kind, as the backend spells it.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceKind::Door => "door",
            DeviceKind::Light => "light",
            DeviceKind::Temperature => "temperature",
            DeviceKind::Humidity => "humidity",
        }
    }

    /// Returns `true` for kinds driven by a local actuator.
    #[must_use]
    pub fn is_actuated(&self) -> bool {
        matches!(self, DeviceKind::Door | DeviceKind::Light)
    }
}

impl fmt::Display for DeviceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DeviceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "door" => Ok(DeviceKind::Door),
            "light" => Ok(DeviceKind::Light),
            "temperature" => Ok(DeviceKind::Temperature),
            "humidity" => Ok(DeviceKind::Humidity),
            other => Err(Error::UnknownDeviceKind(other.to_string())),
        }
    }
}

/// Two-state device condition: door open / light lit is `On`.
///
/// A single authoritative instance is held by each reconciliation
/// engine; everything else reads it through the engine's accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceState {
    On,
    Off,
}

impl DeviceState {
    /// Wire name of the state ("on" / "off").
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceState::On => "on",
            DeviceState::Off => "off",
        }
    }

    /// The opposite state.
    #[must_use]
    pub fn toggled(&self) -> Self {
        match self {
            DeviceState::On => DeviceState::Off,
            DeviceState::Off => DeviceState::On,
        }
    }

    /// Returns `true` if the state is `On`.
    #[must_use]
    pub fn is_on(&self) -> bool {
        matches!(self, DeviceState::On)
    }

    /// Map a binary output level to a state.
    #[must_use]
    pub fn from_level(on: bool) -> Self {
        if on { DeviceState::On } else { DeviceState::Off }
    }
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DeviceState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "on" => Ok(DeviceState::On),
            "off" => Ok(DeviceState::Off),
            other => Err(Error::InvalidDeviceState(other.to_string())),
        }
    }
}

/// Opaque credential identifier read from a scan event.
///
/// # Security
/// This type implements constant-time comparison so allow-list checks
/// during access decisions do not leak timing information about how
/// much of the identifier matched.
#[derive(Debug, Clone, Copy, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(u64);

impl Credential {
    /// Wrap a raw scanned identifier.
    #[must_use]
    pub fn new(id: u64) -> Self {
        Credential(id)
    }

    /// Get the raw identifier.
    #[must_use]
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Credential {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Credential {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let id: u64 = s
            .trim()
            .parse()
            .map_err(|_| Error::InvalidCredential(format!("Invalid credential: {s}")))?;
        Ok(Credential(id))
    }
}

/// Constant-time comparison implementation for Credential
///
/// This prevents timing attacks by ensuring comparison takes the same
/// time regardless of where the identifiers differ.
impl PartialEq for Credential {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_le_bytes().ct_eq(&other.0.to_le_bytes()).into()
    }
}

/// Hash implementation for Credential
///
/// Implements standard hashing for use in hash-based collections.
impl std::hash::Hash for Credential {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

/// Validate an actuator angle against the mechanical range.
///
/// # Errors
/// Returns `Error::AngleOutOfRange` if `degrees` falls outside
/// [`MIN_ANGLE`]..=[`MAX_ANGLE`].
pub fn validate_angle(degrees: i16) -> Result<i16> {
    if !(MIN_ANGLE..=MAX_ANGLE).contains(&degrees) {
        return Err(Error::AngleOutOfRange {
            degrees,
            min: MIN_ANGLE,
            max: MAX_ANGLE,
        });
    }
    Ok(degrees)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", 1)]
    #[case("42", 42)]
    fn test_room_id_valid(#[case] input: &str, #[case] expected: u32) {
        let id: RoomId = input.parse().unwrap();
        assert_eq!(id.as_u32(), expected);
    }

    #[rstest]
    #[case("0")] // zero invalid
    #[case("-1")] // negative
    #[case("abc")] // non-numeric
    fn test_room_id_invalid(#[case] input: &str) {
        let result: Result<RoomId> = input.parse();
        assert!(result.is_err());
    }

    #[rstest]
    #[case("door", DeviceKind::Door)]
    #[case("light", DeviceKind::Light)]
    #[case("temperature", DeviceKind::Temperature)]
    #[case("humidity", DeviceKind::Humidity)]
    fn test_device_kind_round_trip(#[case] input: &str, #[case] expected: DeviceKind) {
        let kind: DeviceKind = input.parse().unwrap();
        assert_eq!(kind, expected);
        assert_eq!(kind.as_str(), input);
    }

    #[test]
    fn test_device_kind_unknown() {
        let result: Result<DeviceKind> = "fan".parse();
        assert!(result.is_err());
    }

    #[test]
    fn test_device_kind_actuated() {
        assert!(DeviceKind::Door.is_actuated());
        assert!(DeviceKind::Light.is_actuated());
        assert!(!DeviceKind::Temperature.is_actuated());
        assert!(!DeviceKind::Humidity.is_actuated());
    }

    #[test]
    fn test_device_state() {
        assert_eq!(DeviceState::On.toggled(), DeviceState::Off);
        assert_eq!(DeviceState::Off.toggled(), DeviceState::On);
        assert!(DeviceState::On.is_on());
        assert!(!DeviceState::Off.is_on());
        assert_eq!(DeviceState::from_level(true), DeviceState::On);
        assert_eq!("on".parse::<DeviceState>().unwrap(), DeviceState::On);
        assert!("open".parse::<DeviceState>().is_err());
    }

    #[test]
    fn test_device_state_serde() {
        let json = serde_json::to_string(&DeviceState::Off).unwrap();
        assert_eq!(json, "\"off\"");
        let state: DeviceState = serde_json::from_str("\"on\"").unwrap();
        assert_eq!(state, DeviceState::On);
    }

    #[test]
    fn test_credential_equality() {
        let a = Credential::new(756_402_188_501);
        let b = Credential::new(756_402_188_501);
        let c = Credential::new(756_402_188_502);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_credential_parse() {
        let c: Credential = " 123456789 ".parse().unwrap();
        assert_eq!(c.value(), 123_456_789);
        assert!("card-1".parse::<Credential>().is_err());
    }

    #[rstest]
    #[case(-90)]
    #[case(0)]
    #[case(90)]
    fn test_validate_angle_ok(#[case] degrees: i16) {
        assert_eq!(validate_angle(degrees).unwrap(), degrees);
    }

    #[rstest]
    #[case(-91)]
    #[case(91)]
    #[case(180)]
    fn test_validate_angle_out_of_range(#[case] degrees: i16) {
        assert!(validate_angle(degrees).is_err());
    }
}
