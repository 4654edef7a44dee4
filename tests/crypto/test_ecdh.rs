// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tests for ECDH shared secret derivation

use super::fixtures::*;
use eccrypto::crypto::{
    derive, derive_padded, derive_with_padding, get_public, get_public_compressed, CryptoError,
    SecretPadding,
};
use proptest::prelude::*;

#[test]
fn test_derive_known_vector() {
    let public_b = get_public(&PRIVATE_KEY_B).unwrap();
    let secret = derive(&PRIVATE_KEY_A, &public_b).unwrap();

    assert_eq!(hex::encode(secret.as_bytes()), SHARED_SECRET_AB_HEX);
}

#[test]
fn test_derive_with_compressed_public_key() {
    let compressed_b = get_public_compressed(&PRIVATE_KEY_B).unwrap();
    let secret = derive(&PRIVATE_KEY_A, &compressed_b).unwrap();

    assert_eq!(hex::encode(secret.as_bytes()), SHARED_SECRET_AB_HEX);
}

#[test]
fn test_derive_is_symmetric() {
    let public_a = get_public(&PRIVATE_KEY_A).unwrap();
    let public_b = get_public(&PRIVATE_KEY_B).unwrap();

    let ab = derive(&PRIVATE_KEY_A, &public_b).unwrap();
    let ba = derive(&PRIVATE_KEY_B, &public_a).unwrap();

    assert_eq!(ab.as_bytes(), ba.as_bytes());
}

#[test]
fn test_padded_and_unpadded_differ_only_in_leading_zeros() {
    // The padded-peer key shares a secret whose X coordinate starts with zero
    let private_key = hex::decode(PADDED_PEER_PRIVATE_KEY_HEX).unwrap();
    let envelope = padded_peer_envelope();

    let unpadded = derive(&private_key, &envelope.ephem_public_key).unwrap();
    let padded = derive_padded(&private_key, &envelope.ephem_public_key).unwrap();

    assert!(unpadded.len() < 32);
    assert_eq!(padded.len(), 32);
    assert!(padded.as_bytes().ends_with(unpadded.as_bytes()));
    assert!(padded.as_bytes()[..32 - unpadded.len()]
        .iter()
        .all(|b| *b == 0));
}

#[test]
fn test_derive_with_padding_matches_shortcuts() {
    let public_b = get_public(&PRIVATE_KEY_B).unwrap();

    let unpadded = derive_with_padding(&PRIVATE_KEY_A, &public_b, SecretPadding::Unpadded).unwrap();
    let padded = derive_with_padding(&PRIVATE_KEY_A, &public_b, SecretPadding::Padded).unwrap();

    assert_eq!(
        unpadded.as_bytes(),
        derive(&PRIVATE_KEY_A, &public_b).unwrap().as_bytes()
    );
    assert_eq!(
        padded.as_bytes(),
        derive_padded(&PRIVATE_KEY_A, &public_b).unwrap().as_bytes()
    );
}

#[test]
fn test_derive_rejects_bad_private_key() {
    let public_b = get_public(&PRIVATE_KEY_B).unwrap();

    for key in [b"test".to_vec(), vec![0u8; 32], vec![0xffu8; 32], vec![0x02; 33]] {
        let result = derive(&key, &public_b);
        assert!(matches!(result, Err(CryptoError::InvalidKey { .. })));
    }
}

#[test]
fn test_derive_rejects_bad_public_key() {
    let mut off_curve = get_public(&PRIVATE_KEY_B).unwrap().to_vec();
    off_curve[40] ^= 0x80;

    for key in [b"test".to_vec(), off_curve, vec![0x04; 64]] {
        let result = derive(&PRIVATE_KEY_A, &key);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.to_string().contains("public key"), "got: {}", err);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_derive_commutes(a in any::<[u8; 32]>(), b in any::<[u8; 32]>()) {
        let (public_a, public_b) = match (get_public(&a), get_public(&b)) {
            (Ok(pa), Ok(pb)) => (pa, pb),
            _ => return Ok(()),
        };

        let ab = derive(&a, &public_b).unwrap();
        let ba = derive(&b, &public_a).unwrap();
        prop_assert_eq!(ab.as_bytes(), ba.as_bytes());
        prop_assert!(!ab.is_empty() && ab.len() <= 32);
    }
}
