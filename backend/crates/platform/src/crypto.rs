//! Cryptographic Utilities

use rand::distributions::{Alphanumeric, Uniform};
use rand::{Rng, RngCore, rngs::OsRng};

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Random string over `[0-9A-Za-z]`, used for user and session ids.
pub fn random_alphanumeric(len: usize) -> String {
    OsRng
        .sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

/// Random lowercase hex string.
pub fn random_hex(len: usize) -> String {
    let digits = Uniform::from(0..HEX_DIGITS.len());
    OsRng
        .sample_iter(digits)
        .take(len)
        .map(|i| char::from(HEX_DIGITS[i]))
        .collect()
}
