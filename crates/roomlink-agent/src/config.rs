//! Agent configuration: CLI, file, and environment layering.
//!
//! Defaults come from `roomlink_core::constants`, a TOML file overlays
//! them, and `ROOMLINK_`-prefixed environment variables overlay the
//! file (`ROOMLINK_REMOTE__ROOM_ID=2` reaches `remote.room_id`).
//! Validation happens once at startup; after that the sections are
//! plain data.

use crate::allowlist::AllowList;
use crate::tasks::access::DenyFeedback;
use clap::Parser;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use roomlink_core::{Error, Result, RoomId, constants, validate_angle};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Config file consulted when `--config` is not given.
const DEFAULT_CONFIG_FILE: &str = "roomlink.toml";

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(
    name = "roomlink-agent",
    version,
    about = "Room edge agent linking the door and light hardware to the backend"
)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    pub log_filter: String,
}

/// Full agent configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AgentConfig {
    pub remote: RemoteSection,
    pub door: DoorSection,
    pub access: AccessSection,
    pub climate: ClimateSection,
}

/// Backend endpoint and timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RemoteSection {
    /// Base URL of the device API.
    pub base_url: String,

    /// Room every call is scoped to.
    pub room_id: u32,

    /// Timeout for one push or poll, in seconds.
    pub push_timeout_secs: u64,

    /// Interval between status polls, in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for RemoteSection {
    fn default() -> Self {
        Self {
            base_url: "https://attcam.cc/api/devices".to_string(),
            room_id: 1,
            push_timeout_secs: constants::DEFAULT_PUSH_TIMEOUT_SECS,
            poll_interval_ms: constants::DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

/// Door actuator geometry and safety timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DoorSection {
    /// Shaft angle of the fully open door, in degrees.
    pub open_angle: i16,

    /// Shaft angle of the fully closed door, in degrees.
    pub closed_angle: i16,

    /// Pause between single-degree sweep steps, in milliseconds.
    pub step_delay_ms: u64,

    /// Delay before an opened door closes itself, in seconds.
    pub auto_close_secs: u64,

    /// Pause after a handled button press, in milliseconds.
    pub button_debounce_ms: u64,
}

impl Default for DoorSection {
    fn default() -> Self {
        Self {
            open_angle: constants::DEFAULT_OPEN_ANGLE,
            closed_angle: constants::DEFAULT_CLOSED_ANGLE,
            step_delay_ms: constants::DEFAULT_STEP_DELAY_MS,
            auto_close_secs: constants::DEFAULT_AUTO_CLOSE_SECS,
            button_debounce_ms: constants::DEFAULT_BUTTON_DEBOUNCE_MS,
        }
    }
}

/// Credential gate policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccessSection {
    /// Allow-listed credential identifiers.
    pub allowed: Vec<u64>,

    /// Pause after each credential read attempt, in milliseconds.
    pub scan_debounce_ms: u64,

    /// On/off repetitions of the denial blink.
    pub deny_blink_count: u32,

    /// Interval between denial blink edges, in milliseconds.
    pub deny_blink_interval_ms: u64,
}

impl Default for AccessSection {
    fn default() -> Self {
        Self {
            allowed: Vec::new(),
            scan_debounce_ms: constants::DEFAULT_SCAN_DEBOUNCE_MS,
            deny_blink_count: constants::DENY_BLINK_COUNT,
            deny_blink_interval_ms: constants::DENY_BLINK_INTERVAL_MS,
        }
    }
}

/// Climate telemetry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClimateSection {
    /// Whether the sensor task runs at all.
    pub enabled: bool,

    /// Interval between samples, in seconds.
    pub sample_interval_secs: u64,
}

impl Default for ClimateSection {
    fn default() -> Self {
        Self {
            enabled: true,
            sample_interval_secs: constants::DEFAULT_CLIMATE_INTERVAL_SECS,
        }
    }
}

impl AgentConfig {
    /// Load configuration from defaults, file, and environment.
    ///
    /// An explicit `path` must exist; the implicit `roomlink.toml` is
    /// optional.
    ///
    /// # Errors
    /// Returns `Error::Config` on unreadable or invalid input.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let figment = Figment::from(Serialized::defaults(AgentConfig::default()));
        let figment = match path {
            Some(path) => figment.merge(Toml::file_exact(path)),
            None => figment.merge(Toml::file(DEFAULT_CONFIG_FILE)),
        };

        let config: AgentConfig = figment
            .merge(Env::prefixed("ROOMLINK_").split("__"))
            .extract()
            .map_err(|e| Error::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the assembled configuration.
    ///
    /// # Errors
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<()> {
        RoomId::new(self.remote.room_id)?;
        Url::parse(&self.remote.base_url).map_err(|e| {
            Error::Config(format!("invalid base_url {}: {e}", self.remote.base_url))
        })?;

        if !(constants::MIN_PUSH_TIMEOUT_SECS..=constants::MAX_PUSH_TIMEOUT_SECS)
            .contains(&self.remote.push_timeout_secs)
        {
            return Err(Error::Config(format!(
                "push_timeout_secs must be {}-{}, got {}",
                constants::MIN_PUSH_TIMEOUT_SECS,
                constants::MAX_PUSH_TIMEOUT_SECS,
                self.remote.push_timeout_secs
            )));
        }
        if self.remote.poll_interval_ms == 0 {
            return Err(Error::Config(
                "poll_interval_ms must be greater than zero".to_string(),
            ));
        }

        validate_angle(self.door.open_angle)?;
        validate_angle(self.door.closed_angle)?;
        if self.door.open_angle == self.door.closed_angle {
            return Err(Error::Config(
                "door open_angle and closed_angle must differ".to_string(),
            ));
        }
        if !(constants::MIN_STEP_DELAY_MS..=constants::MAX_STEP_DELAY_MS)
            .contains(&self.door.step_delay_ms)
        {
            return Err(Error::Config(format!(
                "step_delay_ms must be {}-{}, got {}",
                constants::MIN_STEP_DELAY_MS,
                constants::MAX_STEP_DELAY_MS,
                self.door.step_delay_ms
            )));
        }
        if self.door.auto_close_secs == 0 {
            return Err(Error::Config(
                "auto_close_secs must be greater than zero".to_string(),
            ));
        }

        if self.climate.enabled && self.climate.sample_interval_secs == 0 {
            return Err(Error::Config(
                "sample_interval_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// The configured room.
    pub fn room(&self) -> Result<RoomId> {
        RoomId::new(self.remote.room_id)
    }

    pub fn push_timeout(&self) -> Duration {
        Duration::from_secs(self.remote.push_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.remote.poll_interval_ms)
    }

    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.door.step_delay_ms)
    }

    pub fn auto_close(&self) -> Duration {
        Duration::from_secs(self.door.auto_close_secs)
    }

    pub fn button_debounce(&self) -> Duration {
        Duration::from_millis(self.door.button_debounce_ms)
    }

    pub fn scan_debounce(&self) -> Duration {
        Duration::from_millis(self.access.scan_debounce_ms)
    }

    pub fn climate_interval(&self) -> Duration {
        Duration::from_secs(self.climate.sample_interval_secs)
    }

    /// The configured credential allow-list.
    pub fn allowlist(&self) -> AllowList {
        AllowList::from_raw(&self.access.allowed)
    }

    /// Denial feedback parameters for the credential gate.
    pub fn deny_feedback(&self) -> DenyFeedback {
        DenyFeedback {
            blink_count: self.access.deny_blink_count,
            blink_interval: Duration::from_millis(self.access.deny_blink_interval_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_validate() {
        let config = AgentConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.remote.room_id, 1);
        assert!(config.access.allowed.is_empty());
        assert!(config.climate.enabled);
    }

    #[test]
    fn test_load_overrides_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roomlink.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(
            file,
            r#"
[remote]
room_id = 4
poll_interval_ms = 2000

[door]
open_angle = 80
auto_close_secs = 12

[access]
allowed = [756402188501]
"#
        )
        .unwrap();

        let config = AgentConfig::load(Some(&path)).unwrap();
        assert_eq!(config.remote.room_id, 4);
        assert_eq!(config.poll_interval(), Duration::from_millis(2000));
        assert_eq!(config.door.open_angle, 80);
        // Untouched keys keep their defaults.
        assert_eq!(config.door.closed_angle, 0);
        assert_eq!(config.auto_close(), Duration::from_secs(12));
        assert!(config.allowlist().permits(&roomlink_core::Credential::new(
            756_402_188_501
        )));
    }

    #[test]
    fn test_load_rejects_missing_explicit_file() {
        let result = AgentConfig::load(Some(Path::new("/nonexistent/roomlink.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_zero_room() {
        let mut config = AgentConfig::default();
        config.remote.room_id = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let mut config = AgentConfig::default();
        config.remote.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_equal_angles() {
        let mut config = AgentConfig::default();
        config.door.open_angle = 45;
        config.door.closed_angle = 45;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_step_delay() {
        let mut config = AgentConfig::default();
        config.door.step_delay_ms = 1;
        assert!(config.validate().is_err());
        config.door.step_delay_ms = 5000;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_push_timeout() {
        let mut config = AgentConfig::default();
        config.remote.push_timeout_secs = 60;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_disabled_climate_skips_interval_check() {
        let mut config = AgentConfig::default();
        config.climate.enabled = false;
        config.climate.sample_interval_secs = 0;
        assert!(config.validate().is_ok());
    }
}
