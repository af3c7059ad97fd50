//! Artifact store configuration via `eventide.toml`
//!
//! A store can be built from defaults or from a config file. On first use an
//! application may drop the commented default file next to its data with
//! [`StoreConfig::write_default_if_missing`] and edit it from there.

use eventide_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file name.
pub const CONFIG_FILE_NAME: &str = "eventide.toml";

/// Artifact store configuration loaded from `eventide.toml`.
///
/// # Example
///
/// ```toml
/// # Reject saves whose aggregate is behind the stream (default: true)
/// optimistic_concurrency = true
///
/// # Load history in windows of at most this many revisions
/// # replay_batch_size = 1000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Check the aggregate's committed revision against the stream version
    /// before saving.
    #[serde(default = "default_optimistic_concurrency")]
    pub optimistic_concurrency: bool,
    /// Maximum number of revisions loaded per stream read during replay.
    /// `None` loads the whole gap in one read.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replay_batch_size: Option<u64>,
}

fn default_optimistic_concurrency() -> bool {
    true
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            optimistic_concurrency: default_optimistic_concurrency(),
            replay_batch_size: None,
        }
    }
}

impl StoreConfig {
    /// Check field values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if `replay_batch_size` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.replay_batch_size == Some(0) {
            return Err(Error::Config(format!(
                "Invalid replay_batch_size 0 in {}. Expected a positive number of revisions.",
                CONFIG_FILE_NAME
            )));
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# eventide artifact store configuration
#
# Optimistic concurrency (default: true)
#   true  = a save fails if another writer advanced the stream first
#   false = only the stream's own persist check applies
optimistic_concurrency = true

# Replay batch size (default: unset, whole history in one read).
# Caps how many revisions are loaded per read when rebuilding an aggregate.
# replay_batch_size = 1000
"#
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: StoreConfig = toml::from_str(&content).map_err(|e| {
            Error::Config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                Error::Config(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            Error::Config(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }
}
