//! JSON import/export of the I/O map.
//!
//! The exchange file pairs the routing map with the output display names of
//! the active preset, so a map saved on one machine carries its labels:
//!
//! ```json
//! {
//!     "mappings": { "7": 3 },
//!     "output_names": { "7": "Stage left" }
//! }
//! ```
//!
//! The file is JSON, matching the format older controller builds write and
//! read; everything loaded from it is sanitized before touching live state.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use matrix_core::RoutingState;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for I/O map file operations.
#[derive(Debug, Error)]
pub enum IoMapError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file content is not a valid I/O map.
    #[error("invalid I/O map file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// On-disk shape of the exchange file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct IoMapFile {
    /// Routing entries, keyed by output number as a string.
    pub mappings: BTreeMap<String, u8>,
    /// Output display names of the preset that was active at export time.
    #[serde(default)]
    pub output_names: BTreeMap<String, String>,
}

impl IoMapFile {
    /// Builds the exchange shape from live state.
    pub fn from_state(routes: &RoutingState, output_names: BTreeMap<String, String>) -> Self {
        Self {
            mappings: routes
                .raw_entries()
                .into_iter()
                .map(|(output, input)| (output.to_string(), input))
                .collect(),
            output_names,
        }
    }

    /// Rebuilds a routing map from the file, dropping malformed entries.
    pub fn routes(&self) -> RoutingState {
        RoutingState::from_raw_entries(
            self.mappings
                .iter()
                .filter_map(|(key, &input)| key.parse::<u8>().ok().map(|output| (output, input))),
        )
    }
}

/// Writes the I/O map to `path` as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`IoMapError::Io`] for file-system failures.
pub fn save_io_map(path: &Path, map: &IoMapFile) -> Result<(), IoMapError> {
    let content = serde_json::to_string_pretty(map)?;
    std::fs::write(path, content).map_err(|source| IoMapError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads an I/O map from `path`.
///
/// # Errors
///
/// Returns [`IoMapError::Io`] if the file cannot be read and
/// [`IoMapError::Parse`] if it is not a valid I/O map.
pub fn load_io_map(path: &Path) -> Result<IoMapFile, IoMapError> {
    let content = std::fs::read_to_string(path).map_err(|source| IoMapError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
