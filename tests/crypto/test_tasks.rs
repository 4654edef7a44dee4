// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Async wrapper tests

use super::fixtures::*;
use eccrypto::crypto::{get_public, tasks, CryptoError, EncryptOptions};

#[tokio::test]
async fn test_async_sign_and_verify() {
    let public_key = get_public(&PRIVATE_KEY).unwrap().to_vec();

    let signature = tasks::sign(PRIVATE_KEY.to_vec(), msg()).await.unwrap();
    assert_eq!(hex::encode(&signature), SIGNATURE_SHA256_HEX);

    assert!(tasks::verify(public_key.clone(), msg(), signature.clone())
        .await
        .is_ok());

    let result = tasks::verify(public_key, other_msg(), signature).await;
    assert!(matches!(result, Err(CryptoError::BadSignature { .. })));
}

#[tokio::test]
async fn test_async_derive() {
    let public_b = get_public(&PRIVATE_KEY_B).unwrap().to_vec();

    let secret = tasks::derive(PRIVATE_KEY_A.to_vec(), public_b).await.unwrap();
    assert_eq!(hex::encode(secret.as_bytes()), SHARED_SECRET_AB_HEX);
}

#[tokio::test]
async fn test_async_encrypt_decrypt() {
    let public_key = get_public(&PRIVATE_KEY_B).unwrap().to_vec();

    let envelope = tasks::encrypt(public_key, b"async".to_vec(), EncryptOptions::new())
        .await
        .unwrap();
    let plaintext = tasks::decrypt(PRIVATE_KEY_B.to_vec(), envelope.clone())
        .await
        .unwrap();
    assert_eq!(plaintext, b"async");

    let result = tasks::decrypt(PRIVATE_KEY_A.to_vec(), envelope).await;
    assert!(matches!(result, Err(CryptoError::BadMac { .. })));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_operations() {
    let mut handles = Vec::new();
    for _ in 0..8 {
        handles.push(tokio::spawn(async {
            tasks::sign(PRIVATE_KEY.to_vec(), msg()).await
        }));
    }

    for handle in handles {
        let signature = handle.await.unwrap().unwrap();
        assert_eq!(hex::encode(signature), SIGNATURE_SHA256_HEX);
    }
}
