// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! ECDSA Signing and Verification
//!
//! Signs caller-supplied message hashes (1 to 32 bytes) with RFC 6979
//! deterministic nonces and DER-encodes the result. Hashes shorter than 32
//! bytes are left-padded with zeros, preserving their integer value.

use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};

use super::error::CryptoError;
use super::keys::{PrivateKey, PublicKey};

/// Maximum message hash size in bytes.
pub const MAX_MESSAGE_HASH_SIZE: usize = 32;

/// Validate the hash length and left-pad it to a full field element
fn prehash(message_hash: &[u8]) -> Result<[u8; MAX_MESSAGE_HASH_SIZE], CryptoError> {
    if message_hash.is_empty() {
        return Err(CryptoError::InvalidMessage {
            reason: "message hash should not be empty".to_string(),
        });
    }

    if message_hash.len() > MAX_MESSAGE_HASH_SIZE {
        return Err(CryptoError::InvalidMessage {
            reason: format!(
                "message hash is too long: expected at most {} bytes, got {}",
                MAX_MESSAGE_HASH_SIZE,
                message_hash.len()
            ),
        });
    }

    let mut padded = [0u8; MAX_MESSAGE_HASH_SIZE];
    padded[MAX_MESSAGE_HASH_SIZE - message_hash.len()..].copy_from_slice(message_hash);
    Ok(padded)
}

/// Sign a message hash
///
/// # Arguments
///
/// * `private_key` - 32-byte private key
/// * `message_hash` - 1 to 32 byte hash of the message (the caller hashes)
///
/// # Returns
///
/// DER-encoded `(r, s)` signature with low-S
///
/// # Errors
///
/// - `CryptoError::InvalidMessage` if the hash is empty or longer than 32 bytes
/// - `CryptoError::InvalidKey` if the private key is not a valid 32-byte scalar
pub fn sign(private_key: &[u8], message_hash: &[u8]) -> Result<Vec<u8>, CryptoError> {
    // 1. Validate message hash length
    let digest = prehash(message_hash)?;

    // 2. Validate private key
    let private_key = PrivateKey::from_slice(private_key)?;
    let signing_key = SigningKey::from(private_key.as_secret());

    // 3. Sign with RFC 6979 nonce (k256 normalizes s to the low half)
    let signature: Signature = signing_key
        .sign_prehash(&digest)
        .map_err(|e| CryptoError::Other(format!("ECDSA signing failed: {}", e)))?;

    Ok(signature.to_der().as_bytes().to_vec())
}

/// Verify a DER-encoded signature over a message hash
///
/// High-S signatures are normalized before verification, so signatures made by
/// signers that skip low-S normalization still verify.
///
/// # Errors
///
/// - `CryptoError::InvalidMessage` if the hash is empty or longer than 32 bytes
/// - `CryptoError::InvalidKey` if the public key does not decode
/// - `CryptoError::BadSignature` if the DER is malformed or the signature does not verify
pub fn verify(public_key: &[u8], message_hash: &[u8], signature: &[u8]) -> Result<(), CryptoError> {
    // 1. Validate message hash length
    let digest = prehash(message_hash)?;

    // 2. Validate public key
    let public_key = PublicKey::from_slice(public_key)?;
    let verifying_key = VerifyingKey::from(public_key.as_curve_point());

    // 3. Parse DER signature
    let signature = Signature::from_der(signature).map_err(|_| CryptoError::BadSignature {
        reason: "malformed DER signature".to_string(),
    })?;
    let signature = signature.normalize_s().unwrap_or(signature);

    // 4. Verify
    verifying_key
        .verify_prehash(&digest, &signature)
        .map_err(|_| CryptoError::BadSignature {
            reason: "signature does not match message hash and public key".to_string(),
        })
}
