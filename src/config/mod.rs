//! Artifactory configuration
//!
//! Settings are read from TOML. Every key is optional; missing keys fall back
//! to the built-in defaults.
//!
//! This module has no configuration file of its own and never looks one up.
//! The embedding service owns the file and passes its contents to
//! [`ArtifactoryConfig::from_toml_str`], or its path to
//! [`ArtifactoryConfig::from_file`].
//!
//! ```toml
//! [codec]
//! max_payload_bytes = 1048576
//! ```

mod defaults;

pub use defaults::BuiltinDefaults;

use std::fs;
use std::io;
use std::path::Path;

use artifactory_wire::{CodecLimits, Serializer};
use serde::{Deserialize, Serialize};

/// Errors for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Wire codec settings (`[codec]` table)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CodecConfig {
    pub max_payload_bytes: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        let defaults = BuiltinDefaults::default();
        Self {
            max_payload_bytes: defaults.max_payload_bytes,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArtifactoryConfig {
    pub codec: CodecConfig,
}

impl ArtifactoryConfig {
    /// Parse configuration from a TOML document.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file at a caller-supplied path.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let config = Self::from_toml_str(&contents)?;
        tracing::debug!(path = %path.display(), ?config, "loaded artifactory configuration");
        Ok(config)
    }

    /// Load configuration from the caller-supplied `path` if it exists,
    /// otherwise use defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::trace!(path = %path.display(), "configuration file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Codec limits derived from this configuration.
    pub fn codec_limits(&self) -> CodecLimits {
        CodecLimits {
            max_payload_bytes: self.codec.max_payload_bytes,
        }
    }

    /// A serializer honoring this configuration.
    pub fn serializer(&self) -> Serializer {
        Serializer::with_limits(self.codec_limits())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.codec.max_payload_bytes == 0 {
            return Err(ConfigError::Invalid(
                "codec.max_payload_bytes must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
