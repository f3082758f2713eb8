//! Error types for request signing.
//!
//! Every failure in this crate is represented by [`SignError`]. Signing is
//! all-or-nothing: when an error is returned, no header has been produced.

/// Errors that can occur while signing a request or deriving credentials.
#[derive(Debug, thiserror::Error)]
pub enum SignError {
    /// A required request attribute is missing or unusable.
    #[error("request validation failed: {0}")]
    Validation(String),

    /// The linkage code could not be decoded into an access key and secret key.
    #[error("linkage code decode failed: {0}")]
    CredentialDecode(String),

    /// A hash, MAC or cipher primitive rejected its configuration. This points
    /// at an environment defect rather than bad input and is not retryable.
    #[error("crypto primitive unavailable: {0}")]
    CryptoConfiguration(String),

    /// The transport request uses a method the adapter does not sign.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),
}

/// Convenience result type for signing operations.
pub type SignResult<T> = Result<T, SignError>;
