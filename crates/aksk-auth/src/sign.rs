//! Signature computation.
//!
//! This module turns a canonical request into the `Authorization` value:
//!
//! 1. Hash the canonical request with SHA-256.
//! 2. Build the string to sign from the algorithm name, the sign-date and that hash.
//! 3. Compute HMAC-SHA256 over the string to sign, keyed by the secret key.
//! 4. Format the access key, signed header list and signature into the
//!    `Authorization` template.

use chrono::{DateTime, Utc};
use hmac::{Hmac, KeyInit, Mac};
use sha2::{Digest, Sha256};

use crate::config::{HexCase, SignDateStyle};
use crate::constants::{ALGORITHM, SIGN_DATE};
use crate::error::{SignError, SignResult};
use crate::headers::HeaderMultimap;

type HmacSha256 = Hmac<Sha256>;

/// Build the string to sign.
///
/// Format:
/// ```text
/// HMAC-SHA256\n
/// <sign-date>\n
/// <hex(SHA256(canonical_request))>
/// ```
///
/// # Examples
///
/// ```
/// use aksk_auth::sign::build_string_to_sign;
///
/// let sts = build_string_to_sign("20240102T030405+0000", "5e5b2bb8");
/// assert_eq!(sts, "HMAC-SHA256\n20240102T030405+0000\n5e5b2bb8");
/// ```
#[must_use]
pub fn build_string_to_sign(sign_date: &str, canonical_request_hash: &str) -> String {
    format!("{ALGORITHM}\n{sign_date}\n{canonical_request_hash}")
}

/// Compute the request signature.
///
/// # Errors
///
/// Returns [`SignError::CryptoConfiguration`] if the MAC cannot be keyed.
pub fn compute_signature(
    canonical_request: &str,
    sign_date: &str,
    secret_key: &str,
    hex_case: HexCase,
) -> SignResult<String> {
    let canonical_hash = hex_case.encode(Sha256::digest(canonical_request.as_bytes()));
    let string_to_sign = build_string_to_sign(sign_date, &canonical_hash);

    tracing::debug!(string_to_sign = %string_to_sign, "Built string to sign");

    let signature = hmac_sha256(secret_key.as_bytes(), string_to_sign.as_bytes())?;
    Ok(hex_case.encode(signature))
}

/// Format the `Authorization` header value.
///
/// # Examples
///
/// ```
/// use aksk_auth::sign::build_authorization_value;
///
/// assert_eq!(
///     build_authorization_value("AK", "sdk-host;sign-date", "abc"),
///     "algorithm=HMAC-SHA256, Access=AK, SignedHeaders=sdk-host;sign-date, Signature=abc"
/// );
/// ```
#[must_use]
pub fn build_authorization_value(
    access_key: &str,
    signed_headers: &str,
    signature: &str,
) -> String {
    format!(
        "algorithm={ALGORITHM}, Access={access_key}, SignedHeaders={signed_headers}, Signature={signature}"
    )
}

/// Pick the sign-date for a request.
///
/// A `sign-date` already present in `headers` (any case) is reused verbatim so a
/// retried request keeps its original timestamp. Otherwise `now` is formatted in
/// the given style.
#[must_use]
pub fn resolve_sign_date(
    headers: &HeaderMultimap,
    now: DateTime<Utc>,
    style: SignDateStyle,
) -> String {
    match headers.first_value_ignore_case(SIGN_DATE) {
        Some(existing) => {
            tracing::debug!(sign_date = existing, "Reusing caller-supplied sign-date");
            existing.to_owned()
        }
        None => format_sign_date(now, style),
    }
}

/// Format a timestamp as a compact UTC sign-date.
///
/// # Examples
///
/// ```
/// use aksk_auth::SignDateStyle;
/// use aksk_auth::sign::format_sign_date;
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
/// assert_eq!(format_sign_date(at, SignDateStyle::Offset), "20240102T030405+0000");
/// assert_eq!(format_sign_date(at, SignDateStyle::Zulu), "20240102T030405Z");
/// ```
#[must_use]
pub fn format_sign_date(at: DateTime<Utc>, style: SignDateStyle) -> String {
    at.format(style.pattern()).to_string()
}

/// Compute HMAC-SHA256 and return the raw bytes.
fn hmac_sha256(key: &[u8], data: &[u8]) -> SignResult<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|err| SignError::CryptoConfiguration(format!("HMAC-SHA256 key rejected: {err}")))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}
