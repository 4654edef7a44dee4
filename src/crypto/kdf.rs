// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! ECIES Key Derivation and Authenticated Encryption
//!
//! **Key schedule**:
//! ```text
//! hash    = SHA-512(shared_secret)        // shared_secret is 1..=32 bytes
//! enc_key = hash[0..32]                    // AES-256-CBC key
//! mac_key = hash[32..64]                   // HMAC-SHA256 key
//! ```
//!
//! **Tag**: `HMAC-SHA256(mac_key, iv || ephemeral_public_key || ciphertext)`
//!
//! Hashing the secret normalizes any secret length into fixed-size keys, which
//! is what lets an unpadded and a padded secret coexist on the wire.

use aes::Aes256;
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256, Sha512};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::ecdh::SharedSecret;
use super::error::CryptoError;

/// AES-256 key size in bytes.
pub const ENCRYPTION_KEY_SIZE: usize = 32;

/// HMAC-SHA256 key size in bytes.
pub const MAC_KEY_SIZE: usize = 32;

/// AES-CBC IV size in bytes.
pub const IV_SIZE: usize = 16;

/// AES block size in bytes.
pub const BLOCK_SIZE: usize = 16;

/// HMAC-SHA256 tag size in bytes.
pub const MAC_SIZE: usize = 32;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;
type HmacSha256 = Hmac<Sha256>;

/// Encryption and MAC keys derived from one shared secret
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKeys {
    encryption_key: [u8; ENCRYPTION_KEY_SIZE],
    mac_key: [u8; MAC_KEY_SIZE],
}

impl DerivedKeys {
    pub fn encryption_key(&self) -> &[u8; ENCRYPTION_KEY_SIZE] {
        &self.encryption_key
    }

    pub fn mac_key(&self) -> &[u8; MAC_KEY_SIZE] {
        &self.mac_key
    }
}

/// Split `SHA-512(shared_secret)` into the encryption and MAC keys
pub fn derive_keys(shared_secret: &SharedSecret) -> DerivedKeys {
    let mut hash = Sha512::digest(shared_secret.as_bytes());

    let mut keys = DerivedKeys {
        encryption_key: [0u8; ENCRYPTION_KEY_SIZE],
        mac_key: [0u8; MAC_KEY_SIZE],
    };
    keys.encryption_key
        .copy_from_slice(&hash[..ENCRYPTION_KEY_SIZE]);
    keys.mac_key.copy_from_slice(&hash[ENCRYPTION_KEY_SIZE..]);
    hash.as_mut_slice().zeroize();

    keys
}

/// Encrypt with AES-256-CBC and PKCS#7 padding
///
/// The output is always a non-empty multiple of 16 bytes; an empty plaintext
/// yields one full padding block.
pub fn aes_cbc_encrypt(
    key: &[u8; ENCRYPTION_KEY_SIZE],
    iv: &[u8; IV_SIZE],
    plaintext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let cipher = Aes256CbcEnc::new_from_slices(key, iv)
        .map_err(|e| CryptoError::Other(format!("Failed to create AES-CBC cipher: {}", e)))?;

    Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

/// Decrypt AES-256-CBC and strip PKCS#7 padding
///
/// Only call this after the MAC has been verified.
///
/// # Errors
///
/// Returns `CryptoError::InvalidEnvelope` if the padding is malformed.
pub fn aes_cbc_decrypt(
    key: &[u8; ENCRYPTION_KEY_SIZE],
    iv: &[u8; IV_SIZE],
    ciphertext: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    let cipher = Aes256CbcDec::new_from_slices(key, iv)
        .map_err(|e| CryptoError::Other(format!("Failed to create AES-CBC cipher: {}", e)))?;

    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CryptoError::invalid_envelope("ciphertext", "invalid PKCS#7 padding"))
}

fn keyed_mac(
    mac_key: &[u8; MAC_KEY_SIZE],
    iv: &[u8],
    ephemeral_public_key: &[u8],
    ciphertext: &[u8],
) -> Result<HmacSha256, CryptoError> {
    let mut mac = <HmacSha256 as Mac>::new_from_slice(mac_key)
        .map_err(|e| CryptoError::Other(format!("Failed to create HMAC-SHA256: {}", e)))?;
    mac.update(iv);
    mac.update(ephemeral_public_key);
    mac.update(ciphertext);
    Ok(mac)
}

/// Compute the envelope tag over `iv || ephemeral_public_key || ciphertext`
pub fn compute_mac(
    mac_key: &[u8; MAC_KEY_SIZE],
    iv: &[u8],
    ephemeral_public_key: &[u8],
    ciphertext: &[u8],
) -> Result<[u8; MAC_SIZE], CryptoError> {
    let tag = keyed_mac(mac_key, iv, ephemeral_public_key, ciphertext)?
        .finalize()
        .into_bytes();

    let mut out = [0u8; MAC_SIZE];
    out.copy_from_slice(&tag);
    Ok(out)
}

/// Recompute the envelope tag and compare it to `expected` in constant time
///
/// # Errors
///
/// Returns `CryptoError::BadMac` on any mismatch, including a wrongly sized tag.
pub fn verify_mac(
    mac_key: &[u8; MAC_KEY_SIZE],
    iv: &[u8],
    ephemeral_public_key: &[u8],
    ciphertext: &[u8],
    expected: &[u8],
) -> Result<(), CryptoError> {
    keyed_mac(mac_key, iv, ephemeral_public_key, ciphertext)?
        .verify_slice(expected)
        .map_err(|_| CryptoError::BadMac {
            reason: "authentication tag mismatch".to_string(),
        })
}
