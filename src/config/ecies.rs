// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! ECIES configuration
//!
//! Controls how the ECDH X coordinate is fed into the KDF and whether
//! decryption retries with the other encoding after a MAC mismatch.
//!
//! ```toml
//! [ecies]
//! secret_padding = "unpadded"
//! padding_fallback = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::crypto::SecretPadding;

/// Environment variable selecting the shared secret encoding (`padded` or `unpadded`).
pub const ENV_SECRET_PADDING: &str = "ECIES_SECRET_PADDING";

/// Environment variable toggling the decryption padding fallback (`true` or `false`).
pub const ENV_PADDING_FALLBACK: &str = "ECIES_PADDING_FALLBACK";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

/// ECIES behaviour settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EciesConfig {
    /// Encoding of the shared secret used when encrypting, and tried first when decrypting
    pub secret_padding: SecretPadding,
    /// Retry decryption with the other encoding when the MAC does not match
    pub padding_fallback: bool,
}

impl Default for EciesConfig {
    fn default() -> Self {
        Self {
            secret_padding: SecretPadding::Unpadded,
            padding_fallback: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    ecies: Option<EciesConfig>,
}

impl EciesConfig {
    /// Parse the `[ecies]` table of a TOML document; a missing table yields defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(file.ecies.unwrap_or_default())
    }

    /// Load configuration from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Load from environment variables
    ///
    /// Unset or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var(ENV_SECRET_PADDING) {
            match val.trim().to_ascii_lowercase().as_str() {
                "padded" => config.secret_padding = SecretPadding::Padded,
                "unpadded" => config.secret_padding = SecretPadding::Unpadded,
                other => tracing::warn!(
                    "Ignoring {}={:?}, expected 'padded' or 'unpadded'",
                    ENV_SECRET_PADDING,
                    other
                ),
            }
        }

        if let Ok(val) = std::env::var(ENV_PADDING_FALLBACK) {
            match val.trim().parse() {
                Ok(enabled) => config.padding_fallback = enabled,
                Err(_) => tracing::warn!(
                    "Ignoring {}={:?}, expected 'true' or 'false'",
                    ENV_PADDING_FALLBACK,
                    val
                ),
            }
        }

        config
    }
}
