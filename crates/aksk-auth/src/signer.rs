//! The request signing facade.
//!
//! [`RequestSigner`] binds one credential pair and a [`SignerConfig`], and turns
//! a [`SignableRequest`] into a [`SignedHeaderSet`]:
//!
//! 1. Drop any caller `Authorization` header.
//! 2. Default `sdk-content-type`, set `sdk-host` to the request host.
//! 3. Reuse the caller `sign-date` or generate one.
//! 4. Build the canonical request over the resulting header set.
//! 5. Sign it and format the `Authorization` value.
//!
//! A signer holds no mutable state and can be shared across threads.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::canonical::build_canonical_request;
use crate::config::SignerConfig;
use crate::constants::{AUTHORIZATION, SDK_CONTENT_TYPE, SDK_HOST, SIGN_DATE};
use crate::credentials::{CredentialSource, Credentials};
use crate::error::SignResult;
use crate::headers::HeaderMultimap;
use crate::request::SignableRequest;
use crate::sign::{build_authorization_value, compute_signature, resolve_sign_date};

/// Signs requests with a fixed credential pair.
///
/// # Examples
///
/// ```
/// use aksk_auth::{Credentials, RequestSigner, SignRequest};
///
/// let signer = RequestSigner::new(Credentials::from_keys("AK", "SK").unwrap());
/// let request = SignRequest::builder()
///     .method("GET")
///     .uri("/api/v1/assets")
///     .host("10.10.10.10")
///     .query_str("")
///     .build()
///     .unwrap();
///
/// let signed = signer.sign(&request).unwrap();
/// assert!(signed.authorization().starts_with("algorithm=HMAC-SHA256, Access=AK, "));
/// assert_eq!(signed.headers().first_value_ignore_case("sdk-host"), Some("10.10.10.10"));
/// ```
#[derive(Debug, Clone)]
pub struct RequestSigner {
    credentials: Credentials,
    config: SignerConfig,
}

impl RequestSigner {
    /// Create a signer with the default configuration.
    #[must_use]
    pub fn new(credentials: Credentials) -> Self {
        Self::with_config(credentials, SignerConfig::default())
    }

    /// Create a signer with an explicit configuration.
    #[must_use]
    pub fn with_config(credentials: Credentials, config: SignerConfig) -> Self {
        Self {
            credentials,
            config,
        }
    }

    /// Create a signer from a linkage code, with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::CredentialDecode`](crate::SignError::CredentialDecode)
    /// if the code cannot be decoded.
    pub fn from_linkage_code(code: &str) -> SignResult<Self> {
        Ok(Self::new(Credentials::from_linkage_code(code)?))
    }

    /// Create a signer from a credential source and configuration.
    ///
    /// # Errors
    ///
    /// Propagates the error from [`CredentialSource::resolve`].
    pub fn from_source(source: &CredentialSource, config: SignerConfig) -> SignResult<Self> {
        Ok(Self::with_config(source.resolve()?, config))
    }

    /// The bound credentials.
    #[must_use]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &SignerConfig {
        &self.config
    }

    /// Sign a request, generating the sign-date from the current time when the
    /// caller did not supply one.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::CryptoConfiguration`](crate::SignError::CryptoConfiguration)
    /// if the MAC cannot be computed.
    pub fn sign<R: SignableRequest + ?Sized>(&self, request: &R) -> SignResult<SignedHeaderSet> {
        self.sign_at(request, Utc::now())
    }

    /// Sign a request as of `now`.
    ///
    /// # Errors
    ///
    /// Same as [`RequestSigner::sign`].
    pub fn sign_at<R: SignableRequest + ?Sized>(
        &self,
        request: &R,
        now: DateTime<Utc>,
    ) -> SignResult<SignedHeaderSet> {
        let mut headers = request.headers().clone();
        headers.remove_ignore_case(AUTHORIZATION);

        match headers.remove_ignore_case(SDK_CONTENT_TYPE) {
            Some(values) => headers.set_all(SDK_CONTENT_TYPE.to_owned(), values),
            None => headers.set(SDK_CONTENT_TYPE, self.config.default_content_type.as_str()),
        }
        headers.set(SDK_HOST, request.host());

        let sign_date = resolve_sign_date(&headers, now, self.config.sign_date_style);
        headers.set(SIGN_DATE, sign_date.as_str());

        let canonical = build_canonical_request(
            request.method(),
            request.uri_path(),
            request.query_str(),
            &headers,
            request.payload(),
            self.config.hex_case,
        );

        debug!(canonical_request = canonical.as_str(), "Built canonical request");

        let signature = compute_signature(
            canonical.as_str(),
            &sign_date,
            self.credentials.secret_key(),
            self.config.hex_case,
        )?;
        let authorization = build_authorization_value(
            self.credentials.access_key(),
            canonical.signed_headers(),
            &signature,
        );

        debug!(signed_headers = canonical.signed_headers(), "Signed request");

        headers.set(AUTHORIZATION, authorization.as_str());

        Ok(SignedHeaderSet {
            headers,
            authorization,
            sign_date,
            signed_headers: canonical.signed_headers().to_owned(),
        })
    }
}

/// The headers to attach to a signed request.
///
/// Holds the caller headers merged with the four computed headers
/// (`Authorization`, `sdk-content-type`, `sdk-host`, `sign-date`), which
/// replace any caller value under the same name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaderSet {
    headers: HeaderMultimap,
    authorization: String,
    sign_date: String,
    signed_headers: String,
}

impl SignedHeaderSet {
    /// The `Authorization` header value.
    #[must_use]
    pub fn authorization(&self) -> &str {
        &self.authorization
    }

    /// The sign-date bound into the signature.
    #[must_use]
    pub fn sign_date(&self) -> &str {
        &self.sign_date
    }

    /// The `;`-joined names of the signed headers.
    #[must_use]
    pub fn signed_headers(&self) -> &str {
        &self.signed_headers
    }

    /// The full merged header set.
    #[must_use]
    pub fn headers(&self) -> &HeaderMultimap {
        &self.headers
    }

    /// The four computed headers, each with its first value.
    pub fn computed(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [AUTHORIZATION, SDK_CONTENT_TYPE, SDK_HOST, SIGN_DATE]
            .into_iter()
            .filter_map(|name| {
                self.headers
                    .get(name)
                    .and_then(<[String]>::first)
                    .map(|value| (name, value.as_str()))
            })
    }

    /// Consume the set, returning the merged headers.
    #[must_use]
    pub fn into_headers(self) -> HeaderMultimap {
        self.headers
    }
}
