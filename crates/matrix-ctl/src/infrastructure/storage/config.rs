//! TOML-based configuration persistence for the controller.
//!
//! Reads and writes [`AppConfig`] to the platform-appropriate config file:
//! - Windows:  `%APPDATA%\hdmi-matrix-ctrl\config.toml`
//! - Linux:    `~/.config/hdmi-matrix-ctrl/config.toml`
//! - macOS:    `~/Library/Application Support/hdmi-matrix-ctrl/config.toml`
//!
//! Fields annotated with `#[serde(default = ...)]` fall back to their
//! defaults when absent, so the app works on first run and when upgrading
//! from an older config file. A missing file yields `AppConfig::default()`;
//! a malformed file is a parse error, never a panic.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use matrix_core::{Endpoint, RoutingState, DEFAULT_HOST, DEFAULT_PORT};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

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

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level application configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    pub device: DeviceConfig,
    #[serde(default)]
    pub ui: UiConfig,
    /// Last known routing, keyed by output number as a string.
    ///
    /// Kept raw here; [`AppConfig::initial_routes`] sanitizes on the way in.
    #[serde(default)]
    pub output_mappings: BTreeMap<String, u8>,
}

/// Address of the matrix device.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeviceConfig {
    #[serde(default = "default_ip")]
    pub ip: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Presentation settings the GUI shell persists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct UiConfig {
    #[serde(default)]
    pub theme: Theme,
    /// Ask before overwriting an existing route.
    #[serde(default)]
    pub confirm_before_switch: bool,
}

/// Colour theme for the GUI shell.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_ip() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            ip: default_ip(),
            port: default_port(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            device: DeviceConfig::default(),
            ui: UiConfig::default(),
            output_mappings: BTreeMap::new(),
        }
    }
}

impl AppConfig {
    /// The device endpoint described by this configuration.
    ///
    /// Falls back to the factory address if the persisted value is unusable.
    pub fn endpoint(&self) -> Endpoint {
        Endpoint::new(self.device.ip.clone(), self.device.port).unwrap_or_default()
    }

    /// Rebuilds the routing map from the persisted mappings.
    ///
    /// Non-numeric keys and out-of-range ports are dropped, never
    /// propagated.
    pub fn initial_routes(&self) -> RoutingState {
        RoutingState::from_raw_entries(self.output_mappings.iter().filter_map(|(key, &input)| {
            match key.parse::<u8>() {
                Ok(output) => Some((output, input)),
                Err(_) => {
                    warn!(key = %key, "dropping persisted route with non-numeric output key");
                    None
                }
            }
        }))
    }

    /// Replaces the persisted mappings with the live routing map.
    pub fn store_routes(&mut self, routes: &RoutingState) {
        self.output_mappings = routes
            .raw_entries()
            .into_iter()
            .map(|(output, input)| (output.to_string(), input))
            .collect();
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Determines the platform-appropriate directory for the config files.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] when the platform config
/// base directory cannot be determined from the environment.
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)
}

/// Resolves the full path to the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot
/// be determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

/// Loads [`AppConfig`] from the default location, returning
/// `AppConfig::default()` if the file does not yet exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not
/// found", and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Loads [`AppConfig`] from `path`; missing file yields the defaults.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let cfg: AppConfig = toml::from_str(&content)?;
            Ok(cfg)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Persists `config` to the default location, creating the config directory
/// if needed.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system failures or
/// [`ConfigError::Serialize`] if serialization fails.
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    save_config_to(&config_file_path()?, config)
}

/// Persists `config` to `path`, creating parent directories if needed.
pub fn save_config_to(path: &Path, config: &AppConfig) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolves the platform config base directory including the app folder.
fn platform_config_dir() -> Option<PathBuf> {
    const APP_DIR: &str = "hdmi-matrix-ctrl";

    #[cfg(target_os = "windows")]
    {
        // %APPDATA% e.g. C:\Users\<user>\AppData\Roaming
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join(APP_DIR))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join(APP_DIR)
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        // XDG_CONFIG_HOME or ~/.config on Linux and other UNIX-likes.
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join(APP_DIR))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
