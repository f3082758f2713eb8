//! AK/SK request signing for the XDR open API.
//!
//! This crate computes the authentication headers a client attaches to each
//! request: an `Authorization` header carrying an HMAC-SHA256 signature over a
//! canonical form of the request, plus the `sdk-content-type`, `sdk-host` and
//! `sign-date` headers the signature covers. It can also derive the access key
//! and secret key from a platform-issued linkage code.
//!
//! # Overview
//!
//! The signature binds the method, URI path, query string, every request header
//! and the request body. The server recomputes it from the request it receives
//! and rejects the request on any mismatch, so nothing covered by the signature
//! may change between signing and sending.
//!
//! # Usage
//!
//! ```rust
//! use aksk_auth::{Credentials, RequestSigner, SignRequest};
//!
//! let signer = RequestSigner::new(Credentials::from_keys("AK", "SK").unwrap());
//!
//! let request = SignRequest::builder()
//!     .method("POST")
//!     .uri("/api/xdr/v1/assets/list")
//!     .host("10.10.10.10")
//!     .query_str("pageSize=10&page=1")
//!     .header("content-type", "application/json")
//!     .payload(br#"{"page": 1, "pageSize": 10}"#.to_vec())
//!     .build()
//!     .unwrap();
//!
//! let signed = signer.sign(&request).unwrap();
//! for (name, value) in signed.computed() {
//!     println!("{name}: {value}");
//! }
//! ```
//!
//! # Modules
//!
//! - [`canonical`] - Canonical request construction
//! - [`config`] - Signer configuration
//! - [`constants`] - Header names and protocol constants
//! - [`credentials`] - Credentials and linkage-code decoding
//! - [`error`] - Signing error types
//! - [`headers`] - Case-preserving header multimap
//! - [`http`] - Signing for `http::Request`
//! - [`payload`] - Payload normalization and hashing
//! - [`request`] - The request attributes covered by a signature
//! - [`sign`] - String-to-sign, HMAC and `Authorization` formatting
//! - [`signer`] - The request signing facade

pub mod canonical;
pub mod config;
pub mod constants;
pub mod credentials;
pub mod error;
pub mod headers;
pub mod http;
pub mod payload;
pub mod request;
pub mod sign;
pub mod signer;

pub use config::{HexCase, SignDateStyle, SignerConfig};
pub use credentials::{CredentialSource, Credentials, LinkageCode};
pub use error::{SignError, SignResult};
pub use headers::HeaderMultimap;
pub use self::http::{sign_http_request, sign_http_request_at};
pub use request::{SignRequest, SignRequestBuilder, SignableRequest};
pub use signer::{RequestSigner, SignedHeaderSet};
