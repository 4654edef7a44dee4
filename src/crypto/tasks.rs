// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Non-blocking wrappers
//!
//! Every operation in this crate is synchronous CPU work. These wrappers move
//! owned inputs onto tokio's blocking pool so async callers never stall a
//! runtime worker. They add no semantics: each returns exactly what the
//! synchronous function returns.
//!
//! ```ignore
//! let envelope = tasks::encrypt(public_key.to_vec(), b"hello".to_vec(), EncryptOptions::new()).await?;
//! let plaintext = tasks::decrypt(private_key.to_vec(), envelope).await?;
//! ```

use super::ecdh::SharedSecret;
use super::ecies::{EncryptOptions, Envelope};
use super::error::CryptoError;

async fn run_blocking<F, T>(operation: &'static str, f: F) -> Result<T, CryptoError>
where
    F: FnOnce() -> Result<T, CryptoError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        CryptoError::Other(format!("{} task failed to complete: {}", operation, e))
    })?
}

/// Async [`sign`](super::signature::sign)
pub async fn sign(private_key: Vec<u8>, message_hash: Vec<u8>) -> Result<Vec<u8>, CryptoError> {
    run_blocking("sign", move || {
        super::signature::sign(&private_key, &message_hash)
    })
    .await
}

/// Async [`verify`](super::signature::verify)
pub async fn verify(
    public_key: Vec<u8>,
    message_hash: Vec<u8>,
    signature: Vec<u8>,
) -> Result<(), CryptoError> {
    run_blocking("verify", move || {
        super::signature::verify(&public_key, &message_hash, &signature)
    })
    .await
}

/// Async [`derive`](super::ecdh::derive)
pub async fn derive(
    private_key_a: Vec<u8>,
    public_key_b: Vec<u8>,
) -> Result<SharedSecret, CryptoError> {
    run_blocking("derive", move || {
        super::ecdh::derive(&private_key_a, &public_key_b)
    })
    .await
}

/// Async [`encrypt`](super::ecies::encrypt)
pub async fn encrypt(
    public_key: Vec<u8>,
    plaintext: Vec<u8>,
    opts: EncryptOptions,
) -> Result<Envelope, CryptoError> {
    run_blocking("encrypt", move || {
        super::ecies::encrypt(&public_key, &plaintext, opts)
    })
    .await
}

/// Async [`decrypt`](super::ecies::decrypt)
pub async fn decrypt(private_key: Vec<u8>, envelope: Envelope) -> Result<Vec<u8>, CryptoError> {
    run_blocking("decrypt", move || {
        super::ecies::decrypt(&private_key, &envelope)
    })
    .await
}
