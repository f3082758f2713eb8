//! Body normalization and hashing.
//!
//! The payload hash deliberately ignores body layout: spaces are dropped and the
//! remaining bytes are sorted before hashing, so two bodies carrying the same
//! multiset of non-space bytes hash identically.

use sha2::{Digest, Sha256};

use crate::config::HexCase;

/// Normalize a body for hashing.
///
/// The body is decoded as UTF-8 (invalid sequences become U+FFFD), every ASCII
/// space is removed and the resulting bytes are sorted in signed byte order.
/// Signed order matches the deployed servers and equals plain ascending order
/// for ASCII bodies.
#[must_use]
pub fn normalize_payload(payload: &[u8]) -> Vec<u8> {
    let text = String::from_utf8_lossy(payload);
    let mut bytes: Vec<u8> = text.bytes().filter(|byte| *byte != b' ').collect();
    bytes.sort_unstable_by_key(|byte| i8::from_ne_bytes([*byte]));
    bytes
}

/// Hash a body as it appears in the last line of the canonical request.
///
/// # Examples
///
/// ```
/// use aksk_auth::HexCase;
/// use aksk_auth::payload::hash_payload;
///
/// assert_eq!(
///     hash_payload(b"", HexCase::Lower),
///     "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
/// );
/// assert_eq!(hash_payload(b"ab", HexCase::Lower), hash_payload(b"b a", HexCase::Lower));
/// ```
#[must_use]
pub fn hash_payload(payload: &[u8], hex_case: HexCase) -> String {
    hex_case.encode(Sha256::digest(normalize_payload(payload)))
}
