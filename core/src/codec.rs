//! Base64url integer codec for JWK modulus and exponent fields
//!
//! Integers are written as base-64 digits over the URL-safe alphabet
//! (`A-Z a-z 0-9 - _`), most significant digit first, with no `=` padding.
//!
//! With [`Padding::Even`] a single leading `A` (digit zero) is added when the
//! digit count is odd. For integers whose big-endian byte length is a multiple
//! of three this makes the output identical to RFC 7518 base64url of those
//! bytes, which is what JWK consumers decode. The exponent 65537 is `AQAB`.

use num_bigint_dig::{BigInt, BigUint};

use crate::errors::{DomainError, DomainResult};

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Left-padding applied to the digit string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Padding {
    /// Minimal digit string; zero encodes as `A`
    None,
    /// Prefix `A` when the digit count is odd; zero encodes as `AA`
    #[default]
    Even,
}

/// Encodes a possibly negative integer, rejecting negatives
pub fn encode(value: &BigInt, padding: Padding) -> DomainResult<String> {
    let magnitude = value.to_biguint().ok_or_else(|| DomainError::InvalidInput {
        message: "cannot base64url-encode a negative integer".to_string(),
    })?;
    Ok(encode_uint(&magnitude, padding))
}

/// Encodes a non-negative integer
pub fn encode_uint(value: &BigUint, padding: Padding) -> String {
    let bytes = value.to_bytes_le();
    let bit_len = match bytes.iter().rposition(|&b| b != 0) {
        Some(top) => top * 8 + (8 - bytes[top].leading_zeros() as usize),
        None => 0,
    };
    let digit_count = bit_len.div_ceil(6).max(1);

    let mut out = String::with_capacity(digit_count + 1);
    if padding == Padding::Even && digit_count % 2 == 1 {
        out.push('A');
    }
    for index in (0..digit_count).rev() {
        out.push(ALPHABET[sextet(&bytes, index * 6) as usize] as char);
    }
    out
}

/// Decodes a digit string produced by [`encode`] or [`encode_uint`]
pub fn decode(text: &str) -> DomainResult<BigUint> {
    if text.is_empty() {
        return Err(DomainError::InvalidInput {
            message: "empty base64url integer".to_string(),
        });
    }

    let mut value = BigUint::from(0u32);
    for c in text.chars() {
        let digit = digit_value(c).ok_or_else(|| DomainError::InvalidInput {
            message: format!("invalid base64url digit '{}'", c),
        })?;
        value = (value << 6usize) + BigUint::from(digit);
    }
    Ok(value)
}

/// Six bits of a little-endian byte string starting at `bit`
fn sextet(bytes: &[u8], bit: usize) -> u8 {
    (0..6).fold(0u8, |acc, offset| {
        let position = bit + offset;
        let set = bytes
            .get(position / 8)
            .map(|byte| (byte >> (position % 8)) & 1 == 1)
            .unwrap_or(false);
        if set {
            acc | (1 << offset)
        } else {
            acc
        }
    })
}

fn digit_value(c: char) -> Option<u32> {
    match c {
        'A'..='Z' => Some(c as u32 - 'A' as u32),
        'a'..='z' => Some(c as u32 - 'a' as u32 + 26),
        '0'..='9' => Some(c as u32 - '0' as u32 + 52),
        '-' => Some(62),
        '_' => Some(63),
        _ => None,
    }
}
