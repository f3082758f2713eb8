//! Canonical request construction.
//!
//! The canonical request is the deterministic text that gets hashed and signed:
//!
//! ```text
//! UPPER(method)\n
//! CanonicalURI\n
//! CanonicalQueryString\n
//! name:value\n          (one line per header, sorted by lowercased name)
//! SignedHeaders\n
//! PayloadHash
//! ```
//!
//! The header lines end in their own newline and the signed header list follows
//! them directly, so there is no blank line between the two blocks.

use crate::config::HexCase;
use crate::headers::HeaderMultimap;
use crate::payload::hash_payload;

/// Which reserved character survives percent-encoding.
#[derive(Debug, Clone, Copy)]
enum EscapeKind {
    /// Path separators stay literal.
    Uri,
    /// Key/value separators stay literal.
    Query,
}

/// The canonical request text together with the signed header list it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    canonical: String,
    signed_headers: String,
}

impl CanonicalRequest {
    /// The full canonical request text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.canonical
    }

    /// The `;`-joined header names, as referenced by `SignedHeaders=`.
    #[must_use]
    pub fn signed_headers(&self) -> &str {
        &self.signed_headers
    }
}

/// Build the canonical request for a set of request attributes.
///
/// Every header in `headers` is signed. Only the first value of each header is
/// part of the canonical text.
///
/// # Examples
///
/// ```
/// use aksk_auth::{HeaderMultimap, HexCase};
/// use aksk_auth::canonical::build_canonical_request;
///
/// let headers: HeaderMultimap = [("sdk-host", "10.10.10.10")].into_iter().collect();
/// let canonical = build_canonical_request("get", "/a/b", "", &headers, b"", HexCase::Lower);
/// assert_eq!(
///     canonical.as_str(),
///     "GET\n/a/b/\n\nsdk-host:10.10.10.10\nsdk-host\n\
///      e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
/// );
/// assert_eq!(canonical.signed_headers(), "sdk-host");
/// ```
#[must_use]
pub fn build_canonical_request(
    method: &str,
    uri_path: &str,
    query_str: &str,
    headers: &HeaderMultimap,
    payload: &[u8],
    hex_case: HexCase,
) -> CanonicalRequest {
    let method = method.to_uppercase();
    let canonical_uri = build_canonical_uri(uri_path);
    let canonical_query = build_canonical_query_string(query_str);
    let names = headers.sorted_names();
    let canonical_headers = build_canonical_headers(headers, &names);
    let signed_headers = build_signed_headers_string(&names);
    let payload_hash = hash_payload(payload, hex_case);

    let canonical = format!(
        "{method}\n{canonical_uri}\n{canonical_query}\n{canonical_headers}{signed_headers}\n{payload_hash}"
    );

    CanonicalRequest {
        canonical,
        signed_headers,
    }
}

/// Build the canonical URI.
///
/// The path is form-encoded as a whole, `~` and `/` are restored, and a trailing
/// `/` is appended when missing.
///
/// # Examples
///
/// ```
/// use aksk_auth::canonical::build_canonical_uri;
///
/// assert_eq!(build_canonical_uri("/a/b"), "/a/b/");
/// assert_eq!(build_canonical_uri("/a/b/"), "/a/b/");
/// assert_eq!(build_canonical_uri(""), "/");
/// ```
#[must_use]
pub fn build_canonical_uri(path: &str) -> String {
    let mut uri = sig_escape(path, EscapeKind::Uri);
    if !uri.ends_with('/') {
        uri.push('/');
    }
    uri
}

/// Build the canonical query string.
///
/// Segments are split on `&`; a segment without `=` gains a trailing `=`.
/// Segments are ordered by key, then by value, where the key ends at the first
/// `=`. Each segment is then form-encoded with `~` and `=` restored.
///
/// # Examples
///
/// ```
/// use aksk_auth::canonical::build_canonical_query_string;
///
/// assert_eq!(build_canonical_query_string(""), "");
/// assert_eq!(build_canonical_query_string("b=2&a=1"), "a=1&b=2");
/// assert_eq!(build_canonical_query_string("flag"), "flag=");
/// ```
#[must_use]
pub fn build_canonical_query_string(query: &str) -> String {
    if query.trim().is_empty() {
        return String::new();
    }

    let mut segments: Vec<String> = query
        .split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if segment.contains('=') {
                segment.to_owned()
            } else {
                format!("{segment}=")
            }
        })
        .collect();

    segments.sort_by(|a, b| split_segment(a).cmp(&split_segment(b)));

    segments
        .iter()
        .map(|segment| sig_escape(segment, EscapeKind::Query))
        .collect::<Vec<_>>()
        .join("&")
}

/// Build the canonical header lines for `names`, each terminated by `\n`.
///
/// Only the first value of each header is used. Returns an empty string when
/// `names` is empty.
#[must_use]
pub fn build_canonical_headers(headers: &HeaderMultimap, names: &[&str]) -> String {
    let mut block = String::new();
    for name in names {
        if let Some(value) = headers.get(name).and_then(<[String]>::first) {
            block.push_str(name);
            block.push(':');
            block.push_str(value);
        }
        block.push('\n');
    }
    block
}

/// Join header names with `;`, keeping their original casing and order.
///
/// # Examples
///
/// ```
/// use aksk_auth::canonical::build_signed_headers_string;
///
/// assert_eq!(build_signed_headers_string(&["content-type", "X-Foo"]), "content-type;X-Foo");
/// ```
#[must_use]
pub fn build_signed_headers_string(names: &[&str]) -> String {
    names.join(";")
}

/// Split a query segment into key and value at the first `=`.
fn split_segment(segment: &str) -> (&str, &str) {
    segment.split_once('=').unwrap_or((segment, ""))
}

/// Form-encode `input` and restore the characters the canonical form keeps
/// literal. Blank input encodes to the empty string.
fn sig_escape(input: &str, kind: EscapeKind) -> String {
    if input.trim().is_empty() {
        return String::new();
    }

    let encoded: String = form_urlencoded::byte_serialize(input.as_bytes()).collect();
    let encoded = encoded.replace("%7E", "~");
    match kind {
        EscapeKind::Uri => encoded.replace("%2F", "/"),
        EscapeKind::Query => encoded.replace("%3D", "="),
    }
}
