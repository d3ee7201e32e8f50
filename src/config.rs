//! User configuration loading and defaults.
//!
//! A small optional JSON file under the platform config directory; every
//! field has a default so a missing file or missing keys are fine.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{JobdexError, Result};

fn default_prompt() -> String {
    "jobdex".to_string()
}

fn default_autosave() -> bool {
    true
}

/// Settings read from `config.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Record file override; the platform data directory is used when
    /// unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_path: Option<PathBuf>,

    /// Save after every mutating REPL command.
    #[serde(default = "default_autosave")]
    pub autosave: bool,

    /// Prompt label shown in the REPL.
    #[serde(default = "default_prompt")]
    pub prompt: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: None,
            autosave: default_autosave(),
            prompt: default_prompt(),
        }
    }
}

impl Config {
    /// Default location under the platform config directory.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("jobdex")
            .join("config.json")
    }

    /// Load from `path`, falling back to defaults when the file does not
    /// exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        serde_json::from_reader(BufReader::new(file)).map_err(|source| {
            JobdexError::CorruptStore {
                path: path.to_path_buf(),
                source,
            }
        })
    }
}
