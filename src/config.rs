//! Access configuration.
//!
//! # Load Order
//!
//! 1. Defaults (builtin roles only)
//! 2. TOML file, if one is given
//! 3. `STOREFRONT_EXTRA_ROLES` environment variable (comma separated)
//!
//! Each layer replaces the extra role list of the previous one.
//!
//! ```toml
//! extra_roles = ["support", "fulfilment"]
//! ```

use std::env::VarError;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::role::RoleVocabulary;

/// Environment variable overriding the extra role list.
pub const EXTRA_ROLES_ENV: &str = "STOREFRONT_EXTRA_ROLES";

/// Configuration error type.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file.
    #[error("failed to read config file '{path}': {source}")]
    ReadFile {
        /// File that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse TOML.
    #[error("failed to parse config: {0}")]
    ParseToml(#[from] toml::de::Error),
}

/// Role vocabulary configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AccessConfig {
    /// Role tags accepted in addition to `admin` and `merchant`.
    pub extra_roles: Vec<String>,
}

impl AccessConfig {
    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ParseToml` for malformed input or unknown keys.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    /// Reads a TOML file, then applies the environment layer.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded access config");
        Ok(config.with_env())
    }

    /// Applies `STOREFRONT_EXTRA_ROLES`, if set.
    ///
    /// A value that is not valid Unicode is ignored with a warning and the
    /// previous layer's list is kept.
    pub fn with_env(self) -> Self {
        match std::env::var(EXTRA_ROLES_ENV) {
            Ok(value) => self.with_extra_roles_list(&value),
            Err(VarError::NotPresent) => self,
            Err(VarError::NotUnicode(_)) => {
                tracing::warn!(
                    var = EXTRA_ROLES_ENV,
                    "ignoring extra roles override that is not valid unicode"
                );
                self
            }
        }
    }

    /// Replaces the extra roles with a comma-separated list. Blank entries are skipped.
    pub fn with_extra_roles_list(mut self, list: &str) -> Self {
        self.extra_roles = list
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(String::from)
            .collect();
        self
    }

    /// Builds the role vocabulary this configuration describes.
    pub fn vocabulary(&self) -> RoleVocabulary {
        self.extra_roles
            .iter()
            .fold(RoleVocabulary::builtin(), |vocab, tag| {
                vocab.with_extension(tag.as_str())
            })
    }
}
