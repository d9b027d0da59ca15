//! TOML-based configuration for the anti-idle agent.
//!
//! Reads `AppConfig` from the platform-appropriate config file:
//! - Windows:  `%APPDATA%\AntiIdle\config.toml`
//! - Linux:    `~/.config/anti-idle/config.toml`
//! - macOS:    `~/Library/Application Support/AntiIdle/config.toml`
//!
//! Example:
//!
//! ```toml
//! [agent]
//! log_level = "debug"
//!
//! [device]
//! x11_display = ":1"
//! ```
//!
//! Every field is optional; a missing file yields [`AppConfig::default`].
//! The heartbeat itself (distance, key, cadence) has no settings, and unknown
//! keys are rejected so that a stray `interval_ms = ...` is reported instead
//! of silently ignored.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// `agent.log_level` is not a valid `tracing` filter directive.
    #[error("invalid log level {0:?}")]
    InvalidLogLevel(String),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub device: DeviceConfig,
}

/// Process-level settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// `tracing` filter directive: `"error"`, `"warn"`, `"info"`, `"debug"`,
    /// `"trace"`, or a full directive such as `"anti_idle=debug"`.
    /// `RUST_LOG` overrides it.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Input device settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DeviceConfig {
    /// X display to inject into (Linux only).  `None` uses `$DISPLAY`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x11_display: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl AgentConfig {
    /// Builds the log filter for `log_level`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLogLevel`] if the directive does not parse.
    pub fn env_filter(&self) -> Result<EnvFilter, ConfigError> {
        EnvFilter::try_new(&self.log_level)
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }
}

// ── Config loading ────────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config base
/// directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads `AppConfig` from the platform config file.
///
/// # Errors
///
/// See [`config_file_path`] and [`load_config_from`].
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Loads `AppConfig` from `path`, returning `AppConfig::default()` if the
/// file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed or has unknown keys.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("AntiIdle"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("anti-idle"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("AntiIdle")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    /// Writes `content` to a per-test file under the system temp directory.
    fn write_temp_config(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "anti-idle-{}-{name}.toml",
            std::process::id()
        ));
        std::fs::write(&path, content).expect("write temp config");
        path
    }

    #[test]
    fn test_app_config_default_log_level_is_info() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.agent.log_level, "info");
        assert_eq!(cfg.device.x11_display, None);
    }

    #[test]
    fn test_load_config_from_missing_file_returns_default() {
        // Arrange
        let path = std::env::temp_dir().join("anti-idle-does-not-exist/config.toml");

        // Act
        let cfg = load_config_from(&path).expect("missing file is not an error");

        // Assert
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn test_load_config_from_reads_all_sections() {
        // Arrange
        let path = write_temp_config(
            "full",
            "[agent]\nlog_level = \"debug\"\n\n[device]\nx11_display = \":1\"\n",
        );

        // Act
        let cfg = load_config_from(&path).expect("valid config");
        let _ = std::fs::remove_file(&path);

        // Assert
        assert_eq!(cfg.agent.log_level, "debug");
        assert_eq!(cfg.device.x11_display.as_deref(), Some(":1"));
    }

    #[test]
    fn test_load_config_from_fills_missing_fields_with_defaults() {
        // Arrange
        let path = write_temp_config("partial", "[device]\n");

        // Act
        let cfg = load_config_from(&path).expect("valid config");
        let _ = std::fs::remove_file(&path);

        // Assert
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn test_load_config_from_rejects_heartbeat_tuning_keys() {
        // Arrange
        let path = write_temp_config("tuning", "[agent]\ninterval_ms = 50\n");

        // Act
        let result = load_config_from(&path);
        let _ = std::fs::remove_file(&path);

        // Assert
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_from_rejects_malformed_toml() {
        let path = write_temp_config("malformed", "[agent\nlog_level = ");

        let result = load_config_from(&path);
        let _ = std::fs::remove_file(&path);

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_app_config_round_trips_through_toml() {
        // Arrange
        let mut cfg = AppConfig::default();
        cfg.agent.log_level = "trace".to_string();
        cfg.device.x11_display = Some(":0".to_string());

        // Act
        let toml_str = toml::to_string_pretty(&cfg).expect("serialize");
        let restored: AppConfig = toml::from_str(&toml_str).expect("deserialize");

        // Assert
        assert_eq!(cfg, restored);
    }

    #[test]
    fn test_env_filter_accepts_levels_and_directives() {
        for level in ["info", "trace", "anti_idle=debug,warn"] {
            let agent = AgentConfig {
                log_level: level.to_string(),
            };
            assert!(agent.env_filter().is_ok(), "{level:?} should parse");
        }
    }

    #[test]
    fn test_env_filter_rejects_invalid_directive() {
        let agent = AgentConfig {
            log_level: "anti_idle=loud".to_string(),
        };
        assert!(matches!(
            agent.env_filter(),
            Err(ConfigError::InvalidLogLevel(level)) if level == "anti_idle=loud"
        ));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_config_file_path_ends_with_app_dir_and_file_name() {
        if let Ok(path) = config_file_path() {
            assert!(path.ends_with("anti-idle/config.toml"));
        }
    }
}
