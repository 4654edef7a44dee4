// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! secp256k1 Key Codec
//!
//! Converts between raw 32-byte private keys and SEC1 public key encodings:
//!
//! - **Uncompressed**: 65 bytes, `0x04 || X || Y`
//! - **Compressed**: 33 bytes, `0x02/0x03 || X`
//!
//! Raw buffers are validated once at the API boundary into [`PrivateKey`] and
//! [`PublicKey`]; everything behind the boundary works with the typed values.

use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{AffinePoint, SecretKey};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use std::fmt;
use zeroize::Zeroize;

use super::error::CryptoError;

/// secp256k1 private key size in bytes.
pub const PRIVATE_KEY_SIZE: usize = 32;

/// Uncompressed public key size in bytes (0x04 prefix + x + y coordinates).
pub const UNCOMPRESSED_PUBLIC_KEY_SIZE: usize = 65;

/// Compressed public key size in bytes (0x02/0x03 prefix + x coordinate).
pub const COMPRESSED_PUBLIC_KEY_SIZE: usize = 33;

/// A validated secp256k1 private key (nonzero scalar below the curve order)
///
/// The underlying scalar is zeroized when the key is dropped.
#[derive(Clone)]
pub struct PrivateKey {
    secret: SecretKey,
}

impl PrivateKey {
    /// Parse a raw private key
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::InvalidKey` if:
    /// - The buffer is not exactly 32 bytes (24- and 48-byte buffers included)
    /// - The scalar is zero or not below the curve order
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        // 1. Validate length. k256 would left-pad 24..31 byte slices, so every
        //    other size is rejected here before it reaches the curve library.
        match bytes.len() {
            PRIVATE_KEY_SIZE => {}
            len @ (24 | 48) => {
                return Err(CryptoError::invalid_private_key(format!(
                    "{}-byte keys belong to other curves, secp256k1 keys are exactly 32 bytes",
                    len
                )));
            }
            len => {
                return Err(CryptoError::invalid_private_key(format!(
                    "expected 32 bytes, got {}",
                    len
                )));
            }
        }

        // 2. Validate scalar range
        let secret = SecretKey::from_slice(bytes).map_err(|_| {
            CryptoError::invalid_private_key("scalar is zero or not below the curve order")
        })?;

        Ok(Self { secret })
    }

    /// Generate a private key from the supplied random source
    ///
    /// Candidates that are not valid scalars are discarded and redrawn.
    pub fn generate<R: RngCore + CryptoRng>(rng: &mut R) -> Self {
        let mut candidate = [0u8; PRIVATE_KEY_SIZE];
        loop {
            rng.fill_bytes(&mut candidate);
            if let Ok(secret) = SecretKey::from_slice(&candidate) {
                candidate.zeroize();
                return Self { secret };
            }
            tracing::debug!("Private key candidate outside the scalar range, drawing again");
        }
    }

    /// Raw 32-byte big-endian scalar
    pub fn to_bytes(&self) -> [u8; PRIVATE_KEY_SIZE] {
        let mut out = [0u8; PRIVATE_KEY_SIZE];
        out.copy_from_slice(&self.secret.to_bytes());
        out
    }

    /// The matching public key
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            point: self.secret.public_key(),
        }
    }

    pub(crate) fn as_secret(&self) -> &SecretKey {
        &self.secret
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PrivateKey([REDACTED])")
    }
}

/// A validated secp256k1 public key
///
/// Compressed and uncompressed inputs decode to the same value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublicKey {
    point: k256::PublicKey,
}

impl PublicKey {
    /// Parse a SEC1-encoded public key (33 bytes compressed or 65 bytes uncompressed)
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::InvalidKey` if:
    /// - The size is neither 33 nor 65 bytes
    /// - The prefix byte does not match the size (hybrid `0x06/0x07` keys are rejected)
    /// - The bytes do not describe a point on secp256k1
    pub fn from_slice(bytes: &[u8]) -> Result<Self, CryptoError> {
        match (bytes.len(), bytes.first()) {
            (UNCOMPRESSED_PUBLIC_KEY_SIZE, Some(0x04))
            | (COMPRESSED_PUBLIC_KEY_SIZE, Some(0x02 | 0x03)) => {}
            (UNCOMPRESSED_PUBLIC_KEY_SIZE | COMPRESSED_PUBLIC_KEY_SIZE, Some(prefix)) => {
                return Err(CryptoError::invalid_public_key(format!(
                    "unexpected SEC1 prefix 0x{:02x} for a {}-byte key",
                    prefix,
                    bytes.len()
                )));
            }
            (len, _) => {
                return Err(CryptoError::invalid_public_key(format!(
                    "expected 33 or 65 bytes, got {}",
                    len
                )));
            }
        }

        let point = k256::PublicKey::from_sec1_bytes(bytes)
            .map_err(|_| CryptoError::invalid_public_key("not a point on secp256k1"))?;

        Ok(Self { point })
    }

    /// 65-byte uncompressed encoding
    pub fn to_uncompressed(&self) -> [u8; UNCOMPRESSED_PUBLIC_KEY_SIZE] {
        let encoded = self.point.to_encoded_point(false);
        let mut out = [0u8; UNCOMPRESSED_PUBLIC_KEY_SIZE];
        out.copy_from_slice(encoded.as_bytes());
        out
    }

    /// 33-byte compressed encoding
    pub fn to_compressed(&self) -> [u8; COMPRESSED_PUBLIC_KEY_SIZE] {
        let encoded = self.point.to_encoded_point(true);
        let mut out = [0u8; COMPRESSED_PUBLIC_KEY_SIZE];
        out.copy_from_slice(encoded.as_bytes());
        out
    }

    pub(crate) fn as_affine(&self) -> &AffinePoint {
        self.point.as_affine()
    }

    pub(crate) fn as_curve_point(&self) -> &k256::PublicKey {
        &self.point
    }
}

/// Derive the 65-byte uncompressed public key for a raw private key
pub fn get_public(private_key: &[u8]) -> Result<[u8; UNCOMPRESSED_PUBLIC_KEY_SIZE], CryptoError> {
    Ok(PrivateKey::from_slice(private_key)?
        .public_key()
        .to_uncompressed())
}

/// Derive the 33-byte compressed public key for a raw private key
pub fn get_public_compressed(
    private_key: &[u8],
) -> Result<[u8; COMPRESSED_PUBLIC_KEY_SIZE], CryptoError> {
    Ok(PrivateKey::from_slice(private_key)?
        .public_key()
        .to_compressed())
}

/// Generate a random private key from the operating system's CSPRNG
pub fn generate_private() -> [u8; PRIVATE_KEY_SIZE] {
    generate_private_with(&mut OsRng)
}

/// Generate a random private key from an injected random source
pub fn generate_private_with<R: RngCore + CryptoRng>(rng: &mut R) -> [u8; PRIVATE_KEY_SIZE] {
    PrivateKey::generate(rng).to_bytes()
}
