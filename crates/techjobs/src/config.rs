//! Configuration for techjobs.
//!
//! Configuration lives in an optional YAML file:
//!
//! ```yaml
//! data-file: resources/job_data.csv
//! ```
//!
//! Missing keys take their defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Data file used when nothing else is configured
pub const DEFAULT_DATA_FILE: &str = "resources/job_data.csv";

/// Environment variable the CLI reads the data file path from
pub const DATA_FILE_ENV: &str = "TECHJOBS_DATA";

/// Configuration file structure for techjobs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", default)]
pub struct Config {
    /// Path to the CSV file holding the job listings
    pub data_file: PathBuf,
}

impl Config {
    /// Configuration pointing at the given data file.
    pub fn with_data_file(path: impl Into<PathBuf>) -> Self {
        Self {
            data_file: path.into(),
        }
    }

    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and [`Error::Config`]
    /// if it is not valid YAML for this structure.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the text is not valid YAML for this structure.
    pub fn from_yaml(content: &str) -> Result<Self> {
        // An empty document deserializes as unit, not as a map of defaults.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::with_data_file(DEFAULT_DATA_FILE)
    }
}
