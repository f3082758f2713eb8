//! The request attributes covered by a signature.
//!
//! [`SignableRequest`] is the capability the signer consumes. [`SignRequest`] is
//! the plain owned implementation, built through [`SignRequestBuilder`] which
//! checks that every required attribute was supplied. Transport adapters either
//! build a [`SignRequest`] or implement the trait directly.

use crate::error::{SignError, SignResult};
use crate::headers::HeaderMultimap;

/// Read access to everything that feeds the canonical request.
///
/// Once a request has been signed none of these attributes may change before
/// it is transmitted; the server recomputes the canonical request from what it
/// receives and any difference invalidates the signature.
pub trait SignableRequest {
    /// The HTTP method, in any case.
    fn method(&self) -> &str;

    /// The URI path, without query string.
    fn uri_path(&self) -> &str;

    /// The target host, written into `sdk-host`.
    fn host(&self) -> &str;

    /// The raw query string, without the leading `?`. May be empty.
    fn query_str(&self) -> &str;

    /// The caller-supplied headers.
    fn headers(&self) -> &HeaderMultimap;

    /// The body bytes. Empty when the request has no body.
    fn payload(&self) -> &[u8];
}

/// An owned, immutable set of request attributes to sign.
///
/// # Examples
///
/// ```
/// use aksk_auth::SignRequest;
///
/// let request = SignRequest::builder()
///     .method("GET")
///     .uri("/api/v1/assets")
///     .host("10.10.10.10")
///     .query_str("page=1")
///     .header("content-type", "application/json")
///     .build()
///     .unwrap();
/// assert_eq!(request.uri(), "/api/v1/assets");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignRequest {
    method: String,
    uri: String,
    host: String,
    query_str: String,
    headers: HeaderMultimap,
    payload: Vec<u8>,
}

impl SignRequest {
    /// Start building a request.
    #[must_use]
    pub fn builder() -> SignRequestBuilder {
        SignRequestBuilder::default()
    }

    /// The HTTP method.
    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The URI path.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// The target host.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// The raw query string.
    #[must_use]
    pub fn query_str(&self) -> &str {
        &self.query_str
    }

    /// The caller-supplied headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMultimap {
        &self.headers
    }

    /// The body bytes.
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}

impl SignableRequest for SignRequest {
    fn method(&self) -> &str {
        &self.method
    }

    fn uri_path(&self) -> &str {
        &self.uri
    }

    fn host(&self) -> &str {
        &self.host
    }

    fn query_str(&self) -> &str {
        &self.query_str
    }

    fn headers(&self) -> &HeaderMultimap {
        &self.headers
    }

    fn payload(&self) -> &[u8] {
        &self.payload
    }
}

/// Builder for [`SignRequest`].
///
/// `method`, `uri`, `host` and `query_str` must be set, although any of them may
/// be the empty string. Headers and payload are optional.
#[derive(Debug, Clone, Default)]
pub struct SignRequestBuilder {
    method: Option<String>,
    uri: Option<String>,
    host: Option<String>,
    query_str: Option<String>,
    headers: HeaderMultimap,
    payload: Vec<u8>,
}

impl SignRequestBuilder {
    /// Set the HTTP method.
    #[must_use]
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Set the URI path.
    #[must_use]
    pub fn uri(mut self, uri: impl Into<String>) -> Self {
        self.uri = Some(uri.into());
        self
    }

    /// Set the target host.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Set the raw query string.
    #[must_use]
    pub fn query_str(mut self, query_str: impl Into<String>) -> Self {
        self.query_str = Some(query_str.into());
        self
    }

    /// Append a header value.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Replace the whole header set.
    #[must_use]
    pub fn headers(mut self, headers: HeaderMultimap) -> Self {
        self.headers = headers;
        self
    }

    /// Set the body bytes.
    #[must_use]
    pub fn payload(mut self, payload: impl Into<Vec<u8>>) -> Self {
        self.payload = payload.into();
        self
    }

    /// Finish the request.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::Validation`] naming the first required attribute
    /// that was never set.
    pub fn build(self) -> SignResult<SignRequest> {
        Ok(SignRequest {
            method: required(self.method, "method")?,
            uri: required(self.uri, "uri")?,
            host: required(self.host, "host")?,
            query_str: required(self.query_str, "query_str")?,
            headers: self.headers,
            payload: self.payload,
        })
    }
}

fn required(value: Option<String>, field: &str) -> SignResult<String> {
    value.ok_or_else(|| SignError::Validation(format!("{field} is required")))
}
