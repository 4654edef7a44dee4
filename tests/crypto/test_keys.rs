// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tests for key generation and public key encodings

use super::fixtures::*;
use eccrypto::crypto::{
    generate_private, get_public, get_public_compressed, CryptoError, PrivateKey, PublicKey,
};

#[test]
fn test_get_public_uncompressed_vector() {
    let public_key = get_public(&PRIVATE_KEY).unwrap();

    assert_eq!(public_key.len(), 65);
    assert_eq!(public_key[0], 0x04);
    assert_eq!(hex::encode(public_key), PUBLIC_KEY_HEX);
}

#[test]
fn test_get_public_compressed_vector() {
    let compressed = get_public_compressed(&PRIVATE_KEY).unwrap();

    assert_eq!(compressed.len(), 33);
    assert_eq!(hex::encode(compressed), PUBLIC_KEY_COMPRESSED_HEX);
}

#[test]
fn test_compressed_shares_x_coordinate() {
    let uncompressed = get_public(&PRIVATE_KEY_B).unwrap();
    let compressed = get_public_compressed(&PRIVATE_KEY_B).unwrap();

    assert!(compressed[0] == 0x02 || compressed[0] == 0x03);
    assert_eq!(&compressed[1..], &uncompressed[1..33]);

    // Parity byte follows the Y coordinate
    let y_is_odd = uncompressed[64] & 1 == 1;
    assert_eq!(compressed[0] == 0x03, y_is_odd);
}

#[test]
fn test_generated_keys_are_valid_and_distinct() {
    let a = generate_private();
    let b = generate_private();

    assert_ne!(a, b);
    assert!(get_public(&a).is_ok());
    assert!(get_public(&b).is_ok());
}

#[test]
fn test_get_public_rejects_invalid_private_keys() {
    let cases: Vec<(&str, Vec<u8>)> = vec![
        ("hex text", b"00".to_vec()),
        ("short text", b"test".to_vec()),
        ("empty", Vec::new()),
        ("24 bytes", vec![0x01; 24]),
        ("31 bytes", vec![0x01; 31]),
        ("33 bytes", vec![0x01; 33]),
        ("48 bytes", vec![0x01; 48]),
        ("65 bytes", vec![0x01; 65]),
        ("zero scalar", vec![0x00; 32]),
        ("above order", vec![0xff; 32]),
    ];

    for (name, key) in cases {
        let result = get_public(&key);
        assert!(result.is_err(), "{} should be rejected", name);
        assert!(
            matches!(result, Err(CryptoError::InvalidKey { .. })),
            "{} should be InvalidKey",
            name
        );
        assert!(get_public_compressed(&key).is_err(), "{} compressed", name);
    }
}

#[test]
fn test_curve_order_boundary() {
    // n - 1 is the largest valid scalar, n itself is not
    let n_minus_one =
        hex::decode("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364140").unwrap();
    let n = hex::decode("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141").unwrap();

    assert!(PrivateKey::from_slice(&n_minus_one).is_ok());
    assert!(PrivateKey::from_slice(&n).is_err());
}

#[test]
fn test_public_key_parsing_accepts_both_encodings() {
    let uncompressed = hex::decode(PUBLIC_KEY_HEX).unwrap();
    let compressed = hex::decode(PUBLIC_KEY_COMPRESSED_HEX).unwrap();

    let a = PublicKey::from_slice(&uncompressed).unwrap();
    let b = PublicKey::from_slice(&compressed).unwrap();

    assert_eq!(a, b);
    assert_eq!(hex::encode(b.to_uncompressed()), PUBLIC_KEY_HEX);
    assert_eq!(hex::encode(a.to_compressed()), PUBLIC_KEY_COMPRESSED_HEX);
}

#[test]
fn test_public_key_parsing_rejects_malformed_input() {
    let mut off_curve = hex::decode(PUBLIC_KEY_HEX).unwrap();
    off_curve[64] ^= 0x01;

    let mut bad_prefix = hex::decode(PUBLIC_KEY_HEX).unwrap();
    bad_prefix[0] = 0x05;

    let truncated = hex::decode(PUBLIC_KEY_HEX).unwrap()[..64].to_vec();

    for key in [off_curve, bad_prefix, truncated, vec![0x04], Vec::new()] {
        let result = PublicKey::from_slice(&key);
        assert!(matches!(result, Err(CryptoError::InvalidKey { .. })));
    }
}

#[test]
fn test_private_key_debug_is_redacted() {
    let key = PrivateKey::from_slice(&PRIVATE_KEY).unwrap();
    let debug = format!("{:?}", key);

    assert!(!debug.contains(&hex::encode(PRIVATE_KEY)));
    assert!(!debug.contains("0101010101"));
}
