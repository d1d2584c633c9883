use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SessionError};

/// Default namespace for snapshot keys.
pub const DEFAULT_KEY_PREFIX: &str = "utagaki_";

/// Configuration for a [`SessionStore`](crate::SessionStore).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Prefix put in front of every collection key in the snapshot.
    pub key_prefix: String,
    /// When the snapshot has no verse entry yet, start the river with the
    /// classical sample verses.
    pub seed_sample_verses: bool,
    /// Directory for a file-backed snapshot. Library callers that pass their
    /// own backend can leave this unset.
    pub data_dir: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            key_prefix: DEFAULT_KEY_PREFIX.into(),
            seed_sample_verses: false,
            data_dir: None,
        }
    }
}

impl SessionConfig {
    /// Parse a configuration from TOML. Missing fields take their defaults.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| SessionError::Config(e.to_string()))
    }

    /// Load a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| SessionError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&raw)
    }

    /// Render this configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| SessionError::Config(e.to_string()))
    }
}
