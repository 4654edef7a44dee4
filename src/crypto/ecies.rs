// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! ECIES Encryption and Decryption
//!
//! Orchestrates the key codec, ECDH and the KDF/AEAD assembly into a single
//! envelope:
//!
//! ```text
//! { iv (16) | ephemPublicKey (65, uncompressed) | ciphertext (16·k) | mac (32) }
//! ```
//!
//! ## Protocol Flow
//!
//! 1. Sender draws (or is given) an ephemeral private key and a 16-byte IV
//! 2. ECDH between the ephemeral key and the recipient's public key
//! 3. `SHA-512(secret)` splits into the AES-256-CBC key and the HMAC-SHA256 key
//! 4. Plaintext is encrypted, then `iv || ephemPublicKey || ciphertext` is MACed
//! 5. Recipient repeats the ECDH with its private key and verifies the MAC
//!    before any decryption happens
//!
//! When the MAC fails, decryption retries once with the other shared-secret
//! encoding (see [`SecretPadding`](super::ecdh::SecretPadding)) so envelopes from peers that zero-pad the
//! X coordinate still open.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::ecdh::{shared_secret, SharedSecret};
use super::error::CryptoError;
use super::kdf::{
    aes_cbc_decrypt, aes_cbc_encrypt, compute_mac, derive_keys, verify_mac, DerivedKeys,
    BLOCK_SIZE, IV_SIZE, MAC_SIZE,
};
use super::keys::{
    PrivateKey, PublicKey, COMPRESSED_PUBLIC_KEY_SIZE, UNCOMPRESSED_PUBLIC_KEY_SIZE,
};
use crate::config::EciesConfig;

/// ECIES ciphertext envelope
///
/// Fields are kept as raw buffers because envelopes usually arrive from a
/// peer; [`Envelope::validate`] checks every size before any cryptographic
/// work. Serializes to JSON as lowercase hex strings:
/// `{"iv": "...", "ephemPublicKey": "...", "ciphertext": "...", "mac": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// 16-byte AES-CBC IV
    #[serde(with = "hex")]
    pub iv: Vec<u8>,
    /// Sender's ephemeral public key (65 bytes uncompressed or 33 bytes compressed)
    #[serde(rename = "ephemPublicKey", with = "hex")]
    pub ephem_public_key: Vec<u8>,
    /// AES-256-CBC ciphertext with PKCS#7 padding
    #[serde(with = "hex")]
    pub ciphertext: Vec<u8>,
    /// 32-byte HMAC-SHA256 tag over `iv || ephemPublicKey || ciphertext`
    #[serde(with = "hex")]
    pub mac: Vec<u8>,
}

impl Envelope {
    /// Check that every field is present and correctly sized
    ///
    /// # Errors
    ///
    /// Returns `CryptoError::InvalidEnvelope` naming the first offending field.
    pub fn validate(&self) -> Result<(), CryptoError> {
        if self.iv.len() != IV_SIZE {
            return Err(CryptoError::invalid_envelope(
                "iv",
                size_reason(&format!("{}", IV_SIZE), self.iv.len()),
            ));
        }

        if self.ephem_public_key.len() != UNCOMPRESSED_PUBLIC_KEY_SIZE
            && self.ephem_public_key.len() != COMPRESSED_PUBLIC_KEY_SIZE
        {
            return Err(CryptoError::invalid_envelope(
                "ephemPublicKey",
                size_reason("33 or 65", self.ephem_public_key.len()),
            ));
        }

        if self.ciphertext.is_empty() {
            return Err(CryptoError::invalid_envelope("ciphertext", "missing"));
        }
        if self.ciphertext.len() % BLOCK_SIZE != 0 {
            return Err(CryptoError::invalid_envelope(
                "ciphertext",
                format!(
                    "length {} is not a multiple of the {}-byte block size",
                    self.ciphertext.len(),
                    BLOCK_SIZE
                ),
            ));
        }

        if self.mac.len() != MAC_SIZE {
            return Err(CryptoError::invalid_envelope(
                "mac",
                size_reason(&format!("{}", MAC_SIZE), self.mac.len()),
            ));
        }

        Ok(())
    }

    /// Flat encoding: `iv || ephemPublicKey || ciphertext || mac`
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(
            self.iv.len() + self.ephem_public_key.len() + self.ciphertext.len() + self.mac.len(),
        );
        out.extend_from_slice(&self.iv);
        out.extend_from_slice(&self.ephem_public_key);
        out.extend_from_slice(&self.ciphertext);
        out.extend_from_slice(&self.mac);
        out
    }

    /// Parse the flat encoding produced by [`Envelope::to_bytes`]
    ///
    /// The ephemeral key size is taken from its SEC1 prefix byte.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        // 1. Ephemeral key size from its prefix
        let prefix = bytes.get(IV_SIZE).ok_or_else(|| {
            CryptoError::invalid_envelope("envelope", size_reason("at least 17", bytes.len()))
        })?;
        let key_len = match prefix {
            0x04 => UNCOMPRESSED_PUBLIC_KEY_SIZE,
            0x02 | 0x03 => COMPRESSED_PUBLIC_KEY_SIZE,
            other => {
                return Err(CryptoError::invalid_envelope(
                    "ephemPublicKey",
                    format!("unknown SEC1 prefix 0x{:02x}", other),
                ));
            }
        };

        // 2. Minimum size: one ciphertext block
        let min_len = IV_SIZE + key_len + BLOCK_SIZE + MAC_SIZE;
        if bytes.len() < min_len {
            return Err(CryptoError::invalid_envelope(
                "envelope",
                size_reason(&format!("at least {}", min_len), bytes.len()),
            ));
        }

        // 3. Split fields
        let (iv, rest) = bytes.split_at(IV_SIZE);
        let (ephem_public_key, rest) = rest.split_at(key_len);
        let (ciphertext, mac) = rest.split_at(rest.len() - MAC_SIZE);

        let envelope = Self {
            iv: iv.to_vec(),
            ephem_public_key: ephem_public_key.to_vec(),
            ciphertext: ciphertext.to_vec(),
            mac: mac.to_vec(),
        };
        envelope.validate()?;
        Ok(envelope)
    }

    pub fn to_json(&self) -> Result<String, CryptoError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, CryptoError> {
        Ok(serde_json::from_str(json)?)
    }
}

fn size_reason(expected: &str, actual: usize) -> String {
    if actual == 0 {
        "missing".to_string()
    } else {
        format!("expected {} bytes, got {}", expected, actual)
    }
}

/// Deterministic overrides for [`encrypt`]
///
/// Unset fields are drawn from the random source.
#[derive(Debug, Clone, Default)]
pub struct EncryptOptions {
    pub ephem_private_key: Option<PrivateKey>,
    pub iv: Option<[u8; IV_SIZE]>,
}

impl EncryptOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ephem_private_key(mut self, key: PrivateKey) -> Self {
        self.ephem_private_key = Some(key);
        self
    }

    pub fn with_iv(mut self, iv: [u8; IV_SIZE]) -> Self {
        self.iv = Some(iv);
        self
    }
}

/// Encrypt a message for a recipient public key
///
/// Uses the operating system's CSPRNG for anything `opts` leaves unset and the
/// default (wire-compatible) [`EciesConfig`].
///
/// # Arguments
///
/// * `public_key` - recipient public key (33 bytes compressed or 65 bytes uncompressed)
/// * `plaintext` - message of any length, including empty
/// * `opts` - optional ephemeral key and IV overrides
///
/// # Errors
///
/// Returns `CryptoError::InvalidKey` if the recipient key does not decode.
///
/// # Example
///
/// ```
/// use eccrypto::crypto::{decrypt, encrypt, generate_private, get_public, EncryptOptions};
///
/// let private_key = generate_private();
/// let public_key = get_public(&private_key)?;
///
/// let envelope = encrypt(&public_key, b"hello", EncryptOptions::new())?;
/// assert_eq!(decrypt(&private_key, &envelope)?, b"hello");
/// # Ok::<(), eccrypto::crypto::CryptoError>(())
/// ```
pub fn encrypt(
    public_key: &[u8],
    plaintext: &[u8],
    opts: EncryptOptions,
) -> Result<Envelope, CryptoError> {
    encrypt_with(
        public_key,
        plaintext,
        opts,
        &EciesConfig::default(),
        &mut OsRng,
    )
}

/// Encrypt with an explicit configuration and random source
pub fn encrypt_with<R: RngCore + CryptoRng>(
    public_key: &[u8],
    plaintext: &[u8],
    opts: EncryptOptions,
    config: &EciesConfig,
    rng: &mut R,
) -> Result<Envelope, CryptoError> {
    // 1. Validate recipient public key
    let recipient = PublicKey::from_slice(public_key)?;

    // 2. Ephemeral key pair
    let ephem_private_key = match opts.ephem_private_key {
        Some(key) => key,
        None => PrivateKey::generate(rng),
    };
    let ephem_public_key = ephem_private_key.public_key().to_uncompressed();

    // 3. ECDH + KDF
    let secret = shared_secret(&ephem_private_key, &recipient, config.secret_padding);
    let keys = derive_keys(&secret);

    // 4. IV
    let iv = match opts.iv {
        Some(iv) => iv,
        None => {
            let mut iv = [0u8; IV_SIZE];
            rng.fill_bytes(&mut iv);
            iv
        }
    };

    // 5. Encrypt, then authenticate iv || ephemPublicKey || ciphertext
    let ciphertext = aes_cbc_encrypt(keys.encryption_key(), &iv, plaintext)?;
    let mac = compute_mac(keys.mac_key(), &iv, &ephem_public_key, &ciphertext)?;

    debug!(
        "ECIES envelope created: {} plaintext bytes, {} ciphertext bytes",
        plaintext.len(),
        ciphertext.len()
    );

    Ok(Envelope {
        iv: iv.to_vec(),
        ephem_public_key: ephem_public_key.to_vec(),
        ciphertext,
        mac: mac.to_vec(),
    })
}

/// Decrypt an envelope with the recipient's private key
///
/// Uses the default (wire-compatible) [`EciesConfig`].
///
/// # Errors
///
/// - `CryptoError::InvalidKey` if the private key is malformed
/// - `CryptoError::InvalidEnvelope` if a field is missing or wrongly sized
/// - `CryptoError::BadMac` if authentication fails; no plaintext is returned
pub fn decrypt(private_key: &[u8], envelope: &Envelope) -> Result<Vec<u8>, CryptoError> {
    decrypt_with_config(private_key, envelope, &EciesConfig::default())
}

/// Decrypt with an explicit configuration
pub fn decrypt_with_config(
    private_key: &[u8],
    envelope: &Envelope,
    config: &EciesConfig,
) -> Result<Vec<u8>, CryptoError> {
    // 1. Validate private key and envelope shape before any cryptographic work
    let private_key = PrivateKey::from_slice(private_key)?;
    envelope.validate()?;

    let mut iv = [0u8; IV_SIZE];
    iv.copy_from_slice(&envelope.iv);

    // 2. The ephemeral key is an authenticated field: a key that no longer
    //    decodes is reported as an authentication failure.
    let ephemeral = PublicKey::from_slice(&envelope.ephem_public_key).map_err(|_| {
        warn!("ECIES decryption rejected: ephemeral public key is not a curve point");
        CryptoError::BadMac {
            reason: "ephemeral public key is not a valid curve point".to_string(),
        }
    })?;

    // 3. ECDH + MAC verification, with the padding fallback
    let primary = shared_secret(&private_key, &ephemeral, config.secret_padding);
    let keys = match verified_keys(&primary, envelope) {
        Ok(keys) => keys,
        Err(err) => {
            let alternate = shared_secret(&private_key, &ephemeral, config.secret_padding.other());
            if !config.padding_fallback || alternate.len() == primary.len() {
                warn!("ECIES decryption rejected: MAC mismatch");
                return Err(err);
            }

            debug!(
                "MAC mismatch with {:?} shared secret, retrying with {:?} encoding",
                config.secret_padding,
                config.secret_padding.other()
            );
            verified_keys(&alternate, envelope).map_err(|_| {
                warn!("ECIES decryption rejected: MAC mismatch with both secret encodings");
                CryptoError::BadMac {
                    reason: "authentication tag mismatch with padded and unpadded shared secret"
                        .to_string(),
                }
            })?
        }
    };

    // 4. Decrypt only after the MAC has been verified
    let plaintext = aes_cbc_decrypt(keys.encryption_key(), &iv, &envelope.ciphertext)?;

    debug!("ECIES envelope opened: {} plaintext bytes", plaintext.len());
    Ok(plaintext)
}

fn verified_keys(secret: &SharedSecret, envelope: &Envelope) -> Result<DerivedKeys, CryptoError> {
    let keys = derive_keys(secret);
    verify_mac(
        keys.mac_key(),
        &envelope.iv,
        &envelope.ephem_public_key,
        &envelope.ciphertext,
        &envelope.mac,
    )?;
    Ok(keys)
}
