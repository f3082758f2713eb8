//! Signing for [`http::Request`] values.
//!
//! The adapter reads the method, host, path, raw query, headers and body from
//! the request, signs them, and writes the four computed headers back onto the
//! request. Header names coming from an [`http::HeaderMap`] are always
//! lowercase, so they are canonicalized in that form.
//!
//! The URI path is percent-decoded before canonicalization, the same way the
//! Java and Go clients read it, so `/a%20b` is signed as the path `/a b`. The
//! query string is signed raw.

use std::borrow::Cow;

use chrono::{DateTime, Utc};
use http::header::{HeaderName, HeaderValue};
use http::{HeaderMap, Method};
use percent_encoding::percent_decode_str;
use tracing::debug;

use crate::error::{SignError, SignResult};
use crate::headers::HeaderMultimap;
use crate::request::SignableRequest;
use crate::signer::{RequestSigner, SignedHeaderSet};

/// Methods the signing protocol is defined for.
const SUPPORTED_METHODS: [Method; 6] = [
    Method::GET,
    Method::HEAD,
    Method::DELETE,
    Method::POST,
    Method::PUT,
    Method::PATCH,
];

/// Sign an [`http::Request`] in place.
///
/// On success the request carries `Authorization`, `sdk-content-type`,
/// `sdk-host` and `sign-date`, replacing any previous values, and the computed
/// header set is returned.
///
/// # Errors
///
/// - [`SignError::UnsupportedMethod`] for methods outside GET, HEAD, DELETE,
///   POST, PUT and PATCH.
/// - [`SignError::Validation`] when no host can be determined, a header value is
///   not UTF-8, or a computed value cannot be written as a header.
///
/// # Examples
///
/// ```
/// use aksk_auth::{Credentials, RequestSigner, sign_http_request};
///
/// let signer = RequestSigner::new(Credentials::from_keys("AK", "SK").unwrap());
/// let mut request = http::Request::builder()
///     .method("POST")
///     .uri("https://10.10.10.10/api/v1/assets?page=1")
///     .header("content-type", "application/json")
///     .body(br#"{"page": 1}"#.to_vec())
///     .unwrap();
///
/// sign_http_request(&signer, &mut request).unwrap();
/// assert!(request.headers().contains_key("authorization"));
/// assert_eq!(request.headers()["sdk-host"], "10.10.10.10");
/// ```
pub fn sign_http_request<B: AsRef<[u8]>>(
    signer: &RequestSigner,
    request: &mut http::Request<B>,
) -> SignResult<SignedHeaderSet> {
    sign_http_request_at(signer, request, Utc::now())
}

/// Sign an [`http::Request`] in place as of `now`.
///
/// # Errors
///
/// Same as [`sign_http_request`].
pub fn sign_http_request_at<B: AsRef<[u8]>>(
    signer: &RequestSigner,
    request: &mut http::Request<B>,
    now: DateTime<Utc>,
) -> SignResult<SignedHeaderSet> {
    let signed = {
        let view = HttpRequestView::new(request)?;
        signer.sign_at(&view, now)?
    };
    apply_signed_headers(request.headers_mut(), &signed)?;
    Ok(signed)
}

/// A borrowed [`SignableRequest`] over an [`http::Request`].
#[derive(Debug)]
struct HttpRequestView<'a> {
    method: &'a str,
    path: Cow<'a, str>,
    host: String,
    query: &'a str,
    headers: HeaderMultimap,
    payload: &'a [u8],
}

impl<'a> HttpRequestView<'a> {
    fn new<B: AsRef<[u8]>>(request: &'a http::Request<B>) -> SignResult<Self> {
        let method = request.method();
        if !SUPPORTED_METHODS.contains(method) {
            return Err(SignError::UnsupportedMethod(method.to_string()));
        }

        let uri = request.uri();
        let host = match uri.authority() {
            Some(authority) => match authority.port_u16() {
                Some(port) => format!("{}:{port}", authority.host()),
                None => authority.host().to_owned(),
            },
            None => request
                .headers()
                .get(http::header::HOST)
                .map(|value| header_value_str(http::header::HOST.as_str(), value))
                .transpose()?
                .ok_or_else(|| SignError::Validation("host is required".to_owned()))?
                .to_owned(),
        };

        Ok(Self {
            method: method.as_str(),
            path: percent_decode_str(uri.path()).decode_utf8_lossy(),
            host,
            query: uri.query().unwrap_or_default(),
            headers: collect_headers(request.headers())?,
            payload: request.body().as_ref(),
        })
    }
}

impl SignableRequest for HttpRequestView<'_> {
    fn method(&self) -> &str {
        self.method
    }

    fn uri_path(&self) -> &str {
        &self.path
    }

    fn host(&self) -> &str {
        &self.host
    }

    fn query_str(&self) -> &str {
        self.query
    }

    fn headers(&self) -> &HeaderMultimap {
        &self.headers
    }

    fn payload(&self) -> &[u8] {
        self.payload
    }
}

fn collect_headers(map: &HeaderMap) -> SignResult<HeaderMultimap> {
    let mut headers = HeaderMultimap::new();
    for (name, value) in map {
        headers.append(name.as_str(), header_value_str(name.as_str(), value)?);
    }
    Ok(headers)
}

fn header_value_str<'v>(name: &str, value: &'v HeaderValue) -> SignResult<&'v str> {
    std::str::from_utf8(value.as_bytes())
        .map_err(|_| SignError::Validation(format!("header {name} is not valid UTF-8")))
}

fn apply_signed_headers(map: &mut HeaderMap, signed: &SignedHeaderSet) -> SignResult<()> {
    for (name, value) in signed.computed() {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|err| SignError::Validation(format!("invalid header name {name}: {err}")))?;
        let header_value = HeaderValue::from_str(value).map_err(|err| {
            SignError::Validation(format!("invalid value for header {name}: {err}"))
        })?;
        map.insert(header_name, header_value);
    }

    debug!(headers = map.len(), "Applied signed headers to request");
    Ok(())
}
