//! Display-name persistence for inputs, outputs, and presets.
//!
//! Names are purely presentational: the controller addresses everything by
//! number and never looks a name up before sending a command. Each preset
//! slot carries its own set of input/output names, plus a marker for the
//! preset recalled last, so relabelling for one show does not disturb
//! another. Stored in `names.toml` next to the main config file.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use matrix_core::{InputPort, OutputPort, PresetId};
use serde::{Deserialize, Serialize};

use crate::infrastructure::storage::config::{config_dir, ConfigError};

/// Key used before any preset has been recalled.
const DEFAULT_PRESET_KEY: &str = "default";

/// On-disk shape of the names file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NamesFile {
    /// Name sets keyed by preset id as a string (`"default"` before any
    /// recall).
    #[serde(default)]
    pub presets: BTreeMap<String, NameSet>,
    /// Key into `presets` for the preset recalled last.
    #[serde(default = "default_current_preset")]
    pub current_preset: String,
}

/// Input and output display names for one preset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct NameSet {
    /// Input names keyed by input number as a string.
    #[serde(default)]
    pub inputs: BTreeMap<String, String>,
    /// Output names keyed by output number as a string.
    #[serde(default)]
    pub outputs: BTreeMap<String, String>,
}

fn default_current_preset() -> String {
    DEFAULT_PRESET_KEY.to_string()
}

impl Default for NamesFile {
    fn default() -> Self {
        let mut presets = BTreeMap::new();
        presets.insert(DEFAULT_PRESET_KEY.to_string(), NameSet::default());
        Self {
            presets,
            current_preset: default_current_preset(),
        }
    }
}

impl NamesFile {
    /// The name set of the current preset, created on demand.
    pub fn current_set_mut(&mut self) -> &mut NameSet {
        self.presets
            .entry(self.current_preset.clone())
            .or_default()
    }

    /// The name set of the current preset, if it exists.
    pub fn current_set(&self) -> Option<&NameSet> {
        self.presets.get(&self.current_preset)
    }

    /// Marks `preset` as current, creating its name set if needed.
    pub fn set_current_preset(&mut self, preset: PresetId) {
        self.current_preset = preset.get().to_string();
        self.current_set_mut();
    }

    /// Renames an input in the current preset. An empty name removes the
    /// label.
    pub fn rename_input(&mut self, input: InputPort, name: impl Into<String>) {
        let name = name.into();
        let set = self.current_set_mut();
        if name.is_empty() {
            set.inputs.remove(&input.get().to_string());
        } else {
            set.inputs.insert(input.get().to_string(), name);
        }
    }

    /// Renames an output in the current preset. An empty name removes the
    /// label.
    pub fn rename_output(&mut self, output: OutputPort, name: impl Into<String>) {
        let name = name.into();
        let set = self.current_set_mut();
        if name.is_empty() {
            set.outputs.remove(&output.get().to_string());
        } else {
            set.outputs.insert(output.get().to_string(), name);
        }
    }

    /// The output names of the current preset, for the I/O map export.
    pub fn current_output_names(&self) -> BTreeMap<String, String> {
        self.current_set()
            .map(|set| set.outputs.clone())
            .unwrap_or_default()
    }

    /// Replaces the output names of the current preset, for the I/O map
    /// import.
    pub fn replace_current_output_names(&mut self, outputs: BTreeMap<String, String>) {
        self.current_set_mut().outputs = outputs;
    }
}

// ── Names repository ──────────────────────────────────────────────────────────

/// Resolves the full path to the names file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot
/// be determined.
pub fn names_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("names.toml"))
}

/// Loads the names file from the default location; missing file yields the
/// defaults.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] or [`ConfigError::Parse`] like the config
/// loader.
pub fn load_names() -> Result<NamesFile, ConfigError> {
    load_names_from(&names_file_path()?)
}

/// Loads the names file from `path`; missing file yields the defaults.
pub fn load_names_from(path: &Path) -> Result<NamesFile, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(NamesFile::default()),
        Err(source) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Persists `names` to the default location.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] or [`ConfigError::Serialize`].
pub fn save_names(names: &NamesFile) -> Result<(), ConfigError> {
    save_names_to(&names_file_path()?, names)
}

/// Persists `names` to `path`, creating parent directories if needed.
pub fn save_names_to(path: &Path, names: &NamesFile) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    let content = toml::to_string_pretty(names)?;
    std::fs::write(path, content).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
