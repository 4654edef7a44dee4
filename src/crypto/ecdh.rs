// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! ECDH Shared Secret Derivation
//!
//! Computes `private_key_a * public_key_b` on secp256k1 and returns the X
//! coordinate of the product point, big-endian.
//!
//! Deployed peers hash the X coordinate *without* re-padding leading zero bytes,
//! so roughly 1 in 256 secrets is shorter than 32 bytes. [`derive`] keeps that
//! encoding because the ECIES wire format depends on it; [`derive_padded`]
//! returns the full 32-byte coordinate.

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::error::CryptoError;
use super::keys::{PrivateKey, PublicKey};

/// Size of the full (padded) X coordinate in bytes.
pub const SHARED_SECRET_SIZE: usize = 32;

/// How the X coordinate is serialized before it reaches the KDF
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecretPadding {
    /// Leading zero bytes stripped (wire-compatible default)
    #[default]
    Unpadded,
    /// Always 32 bytes, zero-padded on the left
    Padded,
}

impl SecretPadding {
    /// The other encoding, used for the decryption fallback
    pub fn other(self) -> Self {
        match self {
            SecretPadding::Unpadded => SecretPadding::Padded,
            SecretPadding::Padded => SecretPadding::Unpadded,
        }
    }
}

/// ECDH output: the big-endian X coordinate of the shared point
///
/// Between 1 and 32 bytes long when unpadded, exactly 32 bytes when padded.
/// Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret {
    bytes: Vec<u8>,
}

impl SharedSecret {
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl std::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SharedSecret({} bytes, [REDACTED])", self.bytes.len())
    }
}

/// Perform ECDH with typed keys and serialize the X coordinate
pub fn shared_secret(
    private_key: &PrivateKey,
    public_key: &PublicKey,
    padding: SecretPadding,
) -> SharedSecret {
    let shared = k256::ecdh::diffie_hellman(
        private_key.as_secret().to_nonzero_scalar(),
        public_key.as_affine(),
    );
    let x = shared.raw_secret_bytes();

    let bytes = match padding {
        SecretPadding::Padded => x.to_vec(),
        SecretPadding::Unpadded => {
            // Strip leading zeros but keep at least one byte
            let start = x
                .iter()
                .position(|b| *b != 0)
                .unwrap_or(SHARED_SECRET_SIZE - 1);
            x[start..].to_vec()
        }
    };

    SharedSecret { bytes }
}

/// Derive the ECDH shared secret in the wire-compatible (unpadded) encoding
///
/// # Arguments
///
/// * `private_key_a` - 32-byte private key
/// * `public_key_b` - counterparty public key (33 bytes compressed or 65 bytes uncompressed)
///
/// # Errors
///
/// Returns `CryptoError::InvalidKey` if either key fails validation.
///
/// # Example
///
/// ```
/// use eccrypto::crypto::{derive, get_public};
///
/// let pub_b = get_public(&[0x03; 32])?;
/// let secret = derive(&[0x02; 32], &pub_b)?;
/// assert_eq!(secret.len(), 32);
/// # Ok::<(), eccrypto::crypto::CryptoError>(())
/// ```
pub fn derive(private_key_a: &[u8], public_key_b: &[u8]) -> Result<SharedSecret, CryptoError> {
    derive_with_padding(private_key_a, public_key_b, SecretPadding::Unpadded)
}

/// Derive the ECDH shared secret zero-padded to exactly 32 bytes
pub fn derive_padded(
    private_key_a: &[u8],
    public_key_b: &[u8],
) -> Result<SharedSecret, CryptoError> {
    derive_with_padding(private_key_a, public_key_b, SecretPadding::Padded)
}

/// Derive the ECDH shared secret with an explicit X coordinate encoding
pub fn derive_with_padding(
    private_key_a: &[u8],
    public_key_b: &[u8],
    padding: SecretPadding,
) -> Result<SharedSecret, CryptoError> {
    let private_key = PrivateKey::from_slice(private_key_a)?;
    let public_key = PublicKey::from_slice(public_key_b)?;
    Ok(shared_secret(&private_key, &public_key, padding))
}
