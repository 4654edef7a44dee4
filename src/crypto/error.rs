// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Crypto Error Types
//!
//! One error type for every key, signature, ECDH and ECIES operation.
//!
//! ## Error Variants
//!
//! - **InvalidKey**: malformed or out-of-range key material (wrong size, invalid scalar, not a curve point)
//! - **InvalidMessage**: message hash has the wrong length (empty or longer than 32 bytes)
//! - **BadSignature**: ECDSA signature is malformed or does not verify
//! - **BadMac**: ECIES authentication tag mismatch
//! - **InvalidEnvelope**: an ECIES envelope field is missing or wrongly sized
//! - **Other**: cipher construction or task join failures
//!
//! Callers rely on telling "malformed input" apart from "authentication failed",
//! so `InvalidMessage` and `InvalidEnvelope` never render as a bad signature or
//! bad MAC.

use std::fmt;

/// Error type for all cryptographic operations in this crate
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Invalid private or public key
    InvalidKey {
        /// Which key failed (e.g. "private_key", "public_key", "ephemeral_private_key")
        key_type: String,
        /// Specific failure reason
        reason: String,
    },

    /// Message hash length outside 1..=32 bytes
    InvalidMessage {
        /// Specific failure reason
        reason: String,
    },

    /// ECDSA signature did not verify
    ///
    /// This error occurs when:
    /// - The DER encoding cannot be parsed
    /// - The signature does not match the hash and public key
    BadSignature {
        /// Specific failure reason
        reason: String,
    },

    /// ECIES MAC verification failed
    ///
    /// No plaintext is ever released alongside this error.
    BadMac {
        /// Specific failure reason
        reason: String,
    },

    /// ECIES envelope field missing or wrongly sized
    InvalidEnvelope {
        /// Which field failed validation
        field: String,
        /// Specific failure reason
        reason: String,
    },

    /// Generic error for library errors or unexpected failures
    Other(String),
}

impl CryptoError {
    pub(crate) fn invalid_private_key(reason: impl Into<String>) -> Self {
        CryptoError::InvalidKey {
            key_type: "private_key".to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_public_key(reason: impl Into<String>) -> Self {
        CryptoError::InvalidKey {
            key_type: "public_key".to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_envelope(field: &str, reason: impl Into<String>) -> Self {
        CryptoError::InvalidEnvelope {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns true for errors that mean "authentication failed" rather than
    /// "malformed input".
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            CryptoError::BadSignature { .. } | CryptoError::BadMac { .. }
        )
    }
}

impl fmt::Display for CryptoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CryptoError::InvalidKey { key_type, reason } => {
                let label = if key_type.contains("public") {
                    "Bad public key"
                } else {
                    "Bad private key"
                };
                write!(f, "{} ({}): {}", label, key_type, reason)
            }
            CryptoError::InvalidMessage { reason } => {
                write!(f, "Invalid message: {}", reason)
            }
            CryptoError::BadSignature { reason } => {
                write!(f, "Bad signature: {}", reason)
            }
            CryptoError::BadMac { reason } => {
                write!(f, "Bad MAC: {}", reason)
            }
            CryptoError::InvalidEnvelope { field, reason } => {
                write!(f, "Invalid envelope field '{}': {}", field, reason)
            }
            CryptoError::Other(msg) => {
                write!(f, "Crypto error: {}", msg)
            }
        }
    }
}

impl std::error::Error for CryptoError {}

impl From<hex::FromHexError> for CryptoError {
    fn from(err: hex::FromHexError) -> Self {
        CryptoError::InvalidEnvelope {
            field: "hex_field".to_string(),
            reason: format!("hex decode error: {}", err),
        }
    }
}

impl From<serde_json::Error> for CryptoError {
    fn from(err: serde_json::Error) -> Self {
        CryptoError::InvalidEnvelope {
            field: "json".to_string(),
            reason: format!("envelope JSON error: {}", err),
        }
    }
}
