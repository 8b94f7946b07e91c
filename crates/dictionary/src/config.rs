//! Dictionary configuration via `envelope.toml`
//!
//! The config file names the JSON code table to load at startup. Without a
//! config file, or without a `dictionary` entry, the embedded table is used.

use crate::dictionary::DictionarySource;
use envelope_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file name looked up next to the application.
pub const CONFIG_FILE_NAME: &str = "envelope.toml";

/// Dictionary configuration loaded from `envelope.toml`.
///
/// # Example
///
/// ```toml
/// # Path to a JSON code table, relative to this file
/// dictionary = "codes.json"
///
/// # Use the embedded table if the file cannot be loaded (default: true)
/// fallback_to_embedded = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryConfig {
    /// JSON code table. `None` selects the embedded table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dictionary: Option<PathBuf>,
    /// Fall back to the embedded table when `dictionary` fails to load.
    #[serde(default = "default_fallback")]
    pub fallback_to_embedded: bool,
}

fn default_fallback() -> bool {
    true
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            dictionary: None,
            fallback_to_embedded: default_fallback(),
        }
    }
}

impl DictionaryConfig {
    /// Config pointing at a dictionary file
    pub fn with_dictionary(path: impl Into<PathBuf>) -> Self {
        Self {
            dictionary: Some(path.into()),
            ..Self::default()
        }
    }

    /// Source the dictionary should be loaded from
    pub fn source(&self) -> DictionarySource {
        match &self.dictionary {
            Some(path) => DictionarySource::File(path.clone()),
            None => DictionarySource::Embedded,
        }
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Response envelope configuration
#
# JSON code table to load at startup, relative to this file.
# Leave commented out to use the embedded table.
# dictionary = "codes.json"

# Use the embedded table if the dictionary file cannot be loaded (default: true).
# When false, a bad dictionary file is a startup error.
fallback_to_embedded = true
"#
    }

    /// Read and parse config from a file path.
    ///
    /// A relative `dictionary` path is resolved against the directory that
    /// holds the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let mut config: DictionaryConfig = toml::from_str(&content).map_err(|e| {
            Error::config(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        if let (Some(dictionary), Some(base)) = (&config.dictionary, path.parent()) {
            if dictionary.is_relative() {
                config.dictionary = Some(base.join(dictionary));
            }
        }
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                Error::config(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }
}
