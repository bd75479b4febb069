use super::*;
use std::collections::HashSet;

fn is_url_safe(secret: &str) -> bool {
    secret
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

#[test]
fn secret_uses_url_safe_alphabet() {
    let secret = generate_secret();

    assert!(is_url_safe(&secret), "unexpected characters in {secret}");
    assert!(!secret.contains('='));
}

#[test]
fn secret_length_is_stable() {
    // 16 bytes -> 32 hex chars -> 43 unpadded base64 chars
    assert_eq!(generate_secret().len(), 43);
}

#[test]
fn secrets_are_distinct() {
    let secrets: HashSet<String> = (0..1000).map(|_| generate_secret()).collect();
    assert_eq!(secrets.len(), 1000);
}

#[test]
fn secret_decodes_to_hex_of_sixteen_bytes() {
    let secret = generate_secret();
    let decoded = URL_SAFE_NO_PAD.decode(&secret).unwrap();
    let bytes = hex::decode(decoded).unwrap();
    assert_eq!(bytes.len(), SECRET_BYTES);
}

#[test]
fn encode_matches_known_value() {
    // hex "00ff" -> base64 of the ASCII text "00ff"
    assert_eq!(encode_secret(&[0x00, 0xff]), "MDBmZg");
}

#[test]
fn degraded_secret_is_url_safe_and_distinct() {
    let secrets: HashSet<String> = (0..1000).map(|_| degraded_secret()).collect();

    assert_eq!(secrets.len(), 1000);
    assert!(secrets.iter().all(|s| !s.is_empty() && is_url_safe(s)));
}

#[test]
fn base36_digits() {
    assert_eq!(to_base36(0), "0");
    assert_eq!(to_base36(35), "z");
    assert_eq!(to_base36(36), "10");
}
