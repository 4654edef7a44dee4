// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod config;
pub mod crypto;

// Re-export main types
pub use config::{ConfigError, EciesConfig};
pub use crypto::{
    decrypt, decrypt_with_config, derive, derive_padded, encrypt, encrypt_with,
    generate_private, generate_private_with, get_public, get_public_compressed, sign, verify,
    CryptoError, EncryptOptions, Envelope, PrivateKey, PublicKey, SecretPadding, SharedSecret,
};
