//! Recorder configuration.
//!
//! Values come from `$XDG_CONFIG_HOME/guirecord/config.json` when present,
//! otherwise from defaults. Command-line flags override either source.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{RecorderError, RecorderResult};

pub const MIN_GRANULARITY: u32 = 1;
pub const MAX_GRANULARITY: u32 = 10;
pub const MAX_WAIT_SECONDS: u32 = 240;
pub const KEY_BUFFER_CAPACITY: usize = 128;

/// Output flavour of the generated script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptFormat {
    /// Neutral statement shapes (`Pause(..)`, `PressButton(..)`).
    #[default]
    Generic,
    /// Perl script targeting X11::GUITest.
    Guitest,
}

impl std::str::FromStr for ScriptFormat {
    type Err = RecorderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "generic" => Ok(Self::Generic),
            "guitest" | "perl" => Ok(Self::Guitest),
            other => Err(RecorderError::config(format!(
                "Unknown script format '{other}' (expected generic or guitest)"
            ))),
        }
    }
}

/// Everything needed to run a recording session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecorderConfig {
    /// Name of the key that stops recording.
    pub exit_key: String,

    /// Leave user delays out of the script.
    pub exclude_delays: bool,

    /// Mouse move resolution, 1 (coarse) to 10 (every move).
    pub granularity: u32,

    /// Buffered key text length that triggers a `SendKeys` flush.
    pub key_buffer_threshold: usize,

    /// Gaps at or below this many milliseconds produce no pause.
    pub min_delay_ms: u64,

    /// A key arriving after a gap longer than this flushes pending keys.
    pub key_gap_flush_ms: u64,

    /// Seconds to wait before recording starts.
    pub wait_secs: u32,

    /// Script flavour to write.
    pub format: ScriptFormat,

    /// Bounds used to turn relative pointer motion into absolute positions.
    pub screen_width: u32,
    pub screen_height: u32,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "guirecord=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            exit_key: "ESC".to_string(),
            exclude_delays: false,
            granularity: MAX_GRANULARITY,
            key_buffer_threshold: 60,
            min_delay_ms: 50,
            key_gap_flush_ms: 1000,
            wait_secs: 1,
            format: ScriptFormat::default(),
            screen_width: 1920,
            screen_height: 1080,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl RecorderConfig {
    /// Load config from the standard location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_file_path())
    }

    /// Load config from `path`, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        if path.exists() {
            match std::fs::read_to_string(path) {
                Ok(content) => match serde_json::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse config at {:?}: {}", path, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read config at {:?}: {}", path, e);
                }
            }
        }
        Self::default()
    }

    /// Reject values the recorder cannot run with.
    pub fn validate(&self) -> RecorderResult<()> {
        if self.exit_key.trim().is_empty() {
            return Err(RecorderError::config("Invalid exit key defined (empty)"));
        }
        if !(MIN_GRANULARITY..=MAX_GRANULARITY).contains(&self.granularity) {
            return Err(RecorderError::config(format!(
                "Invalid granularity defined (supplied {}, but needs {}-{})",
                self.granularity, MIN_GRANULARITY, MAX_GRANULARITY
            )));
        }
        if self.wait_secs == 0 || self.wait_secs > MAX_WAIT_SECONDS {
            return Err(RecorderError::config(format!(
                "Invalid wait defined (supplied {}, but needs 1-{})",
                self.wait_secs, MAX_WAIT_SECONDS
            )));
        }
        if self.key_buffer_threshold == 0 || self.key_buffer_threshold > KEY_BUFFER_CAPACITY {
            return Err(RecorderError::config(format!(
                "Invalid key buffer threshold (supplied {}, but needs 1-{})",
                self.key_buffer_threshold, KEY_BUFFER_CAPACITY
            )));
        }
        if self.screen_width == 0 || self.screen_height == 0 {
            return Err(RecorderError::config("Screen bounds must be non-zero"));
        }
        Ok(())
    }
}

/// Standard config file location.
pub fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("guirecord").join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = RecorderConfig::default();
        assert_eq!(config.exit_key, "ESC");
        assert_eq!(config.granularity, 10);
        assert_eq!(config.key_buffer_threshold, 60);
        assert_eq!(config.min_delay_ms, 50);
        assert_eq!(config.key_gap_flush_ms, 1000);
        assert!(!config.exclude_delays);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_granularity_out_of_range_rejected() {
        for granularity in [0, 11] {
            let config = RecorderConfig {
                granularity,
                ..RecorderConfig::default()
            };
            assert!(matches!(
                config.validate(),
                Err(RecorderError::Config { .. })
            ));
        }
    }

    #[test]
    fn test_wait_out_of_range_rejected() {
        let config = RecorderConfig {
            wait_secs: 241,
            ..RecorderConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_threshold_above_capacity_rejected() {
        let config = RecorderConfig {
            key_buffer_threshold: KEY_BUFFER_CAPACITY + 1,
            ..RecorderConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: RecorderConfig =
            serde_json::from_str(r#"{"granularity":3,"format":"guitest"}"#).unwrap();
        assert_eq!(config.granularity, 3);
        assert_eq!(config.format, ScriptFormat::Guitest);
        assert_eq!(config.exit_key, "ESC");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let path = std::env::temp_dir()
            .join("guirecord_test_config_missing")
            .join("config.json");
        assert_eq!(RecorderConfig::load_from(&path), RecorderConfig::default());
    }

    #[test]
    fn test_script_format_from_str() {
        assert_eq!("generic".parse::<ScriptFormat>().unwrap(), ScriptFormat::Generic);
        assert_eq!("GUITEST".parse::<ScriptFormat>().unwrap(), ScriptFormat::Guitest);
        assert!("html".parse::<ScriptFormat>().is_err());
    }
}
