//! Header names, wire templates and linkage code layout.
//!
//! The string values here are part of the wire format shared with the
//! verifying server and must not change.

/// Name of the header carrying the computed authorization value.
pub const AUTHORIZATION: &str = "Authorization";

/// Companion header carrying the request content type.
pub const SDK_CONTENT_TYPE: &str = "sdk-content-type";

/// Companion header carrying the target host.
pub const SDK_HOST: &str = "sdk-host";

/// Companion header carrying the timestamp bound into the signature.
pub const SIGN_DATE: &str = "sign-date";

/// Content type used when the caller does not set `sdk-content-type`.
pub const DEFAULT_CONTENT_TYPE: &str = "application/json";

/// The signing algorithm name, used in both the string to sign and the
/// `Authorization` value.
pub const ALGORITHM: &str = "HMAC-SHA256";

/// Number of `|`-separated fields in a decoded linkage code.
pub const LINKAGE_CODE_FIELD_COUNT: usize = 14;

/// Field positions joined with `+` to form the AES key derivation string.
pub const KEY_DERIVATION_FIELDS: [usize; 8] = [0, 1, 2, 3, 4, 5, 6, 11];

/// Field position of the encrypted access key.
pub const ACCESS_KEY_FIELD: usize = 9;

/// Field position of the encrypted secret key.
pub const SECRET_KEY_FIELD: usize = 10;

/// Separator between linkage code fields.
pub const LINKAGE_CODE_SEPARATOR: char = '|';

/// Separator between the key derivation fields.
pub const KEY_DERIVATION_SEPARATOR: &str = "+";

/// Size of the all-zero CBC initialization vector.
pub const AES_IV_LEN: usize = 16;
