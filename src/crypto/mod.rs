// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! secp256k1 Crypto Module
//!
//! This module implements the elliptic-curve primitives and the ECIES
//! construction built on top of them:
//!
//! - **Keys**: private key validation/generation and SEC1 public key encodings
//! - **ECDH**: shared secret derivation (X coordinate of the product point)
//! - **KDF**: SHA-512 key split, AES-256-CBC and HMAC-SHA256 envelope tag
//! - **ECIES**: envelope encryption/decryption with MAC-before-decrypt
//! - **Signature**: ECDSA sign/verify over caller-supplied hashes (DER)
//! - **Tasks**: async wrappers over the synchronous operations
//!
//! ## Security Considerations
//!
//! - Keys are never retained between calls; callers own key lifecycle
//! - Private keys, shared secrets and derived keys are zeroized on drop
//! - The MAC is verified in constant time before any plaintext is produced
//! - Key material and plaintext are never logged

pub mod ecdh;
pub mod ecies;
pub mod error;
pub mod kdf;
pub mod keys;
pub mod signature;
pub mod tasks;

pub use ecdh::{derive, derive_padded, derive_with_padding, SecretPadding, SharedSecret};
pub use ecies::{decrypt, decrypt_with_config, encrypt, encrypt_with, EncryptOptions, Envelope};
pub use error::CryptoError;
pub use keys::{
    generate_private, generate_private_with, get_public, get_public_compressed, PrivateKey,
    PublicKey,
};
pub use signature::{sign, verify};
