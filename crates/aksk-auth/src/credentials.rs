//! Access-key/secret-key credentials and linkage code decoding.
//!
//! Credentials are either supplied directly or derived from a linkage code, an
//! opaque hex string issued by the platform. A linkage code decodes to 14
//! `|`-separated fields. Fields 0-6 and 11 are joined with `+` and hashed with
//! SHA-256 to form an AES-256 key; fields 9 and 10 are the hex-encoded access
//! key and secret key, encrypted with AES-256-CBC, no padding and an all-zero IV.
//!
//! The zero IV is part of the issued credential format and cannot be changed on
//! this side without breaking every linkage code already handed out.

use std::fmt;

use aes::Aes256;
use cbc::cipher::block_padding::NoPadding;
use cbc::cipher::{BlockDecryptMut, KeyIvInit};
use sha2::{Digest, Sha256};

use crate::constants::{
    ACCESS_KEY_FIELD, AES_IV_LEN, KEY_DERIVATION_FIELDS, KEY_DERIVATION_SEPARATOR,
    LINKAGE_CODE_FIELD_COUNT, LINKAGE_CODE_SEPARATOR, SECRET_KEY_FIELD,
};
use crate::error::{SignError, SignResult};

type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// An access key and secret key pair.
///
/// The `Debug` output never includes the secret key.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_key: String,
    secret_key: String,
}

impl Credentials {
    /// Build credentials from a known key pair.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::Validation`] if either key is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use aksk_auth::Credentials;
    ///
    /// let credentials = Credentials::from_keys("AK", "SK").unwrap();
    /// assert_eq!(credentials.access_key(), "AK");
    /// assert!(Credentials::from_keys("", "SK").is_err());
    /// ```
    pub fn from_keys(
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> SignResult<Self> {
        let access_key = access_key.into();
        let secret_key = secret_key.into();
        if access_key.is_empty() {
            return Err(SignError::Validation("access key must not be empty".to_owned()));
        }
        if secret_key.is_empty() {
            return Err(SignError::Validation("secret key must not be empty".to_owned()));
        }
        Ok(Self {
            access_key,
            secret_key,
        })
    }

    /// Derive credentials from a hex-encoded linkage code.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::CredentialDecode`] if any decoding step fails.
    pub fn from_linkage_code(code: &str) -> SignResult<Self> {
        LinkageCode::parse(code)?.decrypt()
    }

    /// The access key, sent in clear in the `Authorization` header.
    #[must_use]
    pub fn access_key(&self) -> &str {
        &self.access_key
    }

    /// The secret key used to key the signature MAC.
    #[must_use]
    pub fn secret_key(&self) -> &str {
        &self.secret_key
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// A decoded linkage code.
///
/// Field names follow the positions used by the issuing platform; only the key
/// derivation inputs and the two ciphertexts affect the derived credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkageCode {
    fields: Vec<String>,
}

impl LinkageCode {
    /// Decode the hex text of a linkage code and split it into its fields.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::CredentialDecode`] if the code is not valid hex, does
    /// not decode to UTF-8, or does not hold exactly 14 fields.
    pub fn parse(code: &str) -> SignResult<Self> {
        let raw = hex::decode(code.trim())
            .map_err(|err| SignError::CredentialDecode(format!("invalid hex encoding: {err}")))?;
        let text = String::from_utf8(raw)
            .map_err(|_| SignError::CredentialDecode("decoded text is not UTF-8".to_owned()))?;

        let fields: Vec<String> = text
            .split(LINKAGE_CODE_SEPARATOR)
            .map(ToOwned::to_owned)
            .collect();
        if fields.len() != LINKAGE_CODE_FIELD_COUNT {
            return Err(SignError::CredentialDecode(format!(
                "expected {LINKAGE_CODE_FIELD_COUNT} fields, found {}",
                fields.len()
            )));
        }

        Ok(Self { fields })
    }

    /// Identifier of the client the code was issued for.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.fields[0]
    }

    /// Platform domain or address.
    #[must_use]
    pub fn domain(&self) -> &str {
        &self.fields[1]
    }

    /// Display name of the client.
    #[must_use]
    pub fn client_name(&self) -> &str {
        &self.fields[2]
    }

    /// Product the client belongs to.
    #[must_use]
    pub fn client_product(&self) -> &str {
        &self.fields[3]
    }

    /// Client version.
    #[must_use]
    pub fn client_version(&self) -> &str {
        &self.fields[4]
    }

    /// Client IP address registered with the platform.
    #[must_use]
    pub fn client_ip(&self) -> &str {
        &self.fields[5]
    }

    /// Granted authority.
    #[must_use]
    pub fn authority(&self) -> &str {
        &self.fields[6]
    }

    /// Free-form extension field.
    #[must_use]
    pub fn extended(&self) -> &str {
        &self.fields[7]
    }

    /// Free-form description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.fields[8]
    }

    /// Hex-encoded AES ciphertext of the access key.
    #[must_use]
    pub fn access_key_ciphertext(&self) -> &str {
        &self.fields[ACCESS_KEY_FIELD]
    }

    /// Hex-encoded AES ciphertext of the secret key.
    #[must_use]
    pub fn secret_key_ciphertext(&self) -> &str {
        &self.fields[SECRET_KEY_FIELD]
    }

    /// Supported protocol version.
    #[must_use]
    pub fn support_version(&self) -> &str {
        &self.fields[11]
    }

    /// HTTPS port of the platform, as issued.
    #[must_use]
    pub fn https_port(&self) -> &str {
        &self.fields[12]
    }

    /// Trailing reserved field, empty in codes issued so far.
    #[must_use]
    pub fn reserved(&self) -> &str {
        &self.fields[13]
    }

    /// The `+`-joined text hashed into the AES key.
    #[must_use]
    pub fn key_derivation_string(&self) -> String {
        KEY_DERIVATION_FIELDS
            .iter()
            .map(|&index| self.fields[index].as_str())
            .collect::<Vec<_>>()
            .join(KEY_DERIVATION_SEPARATOR)
    }

    /// Decrypt the access key and secret key.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::CredentialDecode`] if a ciphertext is not valid hex,
    /// is not a whole number of AES blocks, or decrypts to non-UTF-8 text.
    pub fn decrypt(&self) -> SignResult<Credentials> {
        let key = Sha256::digest(self.key_derivation_string().as_bytes());

        tracing::debug!(client_id = self.client_id(), "Decrypting linkage code credentials");

        let access_key =
            decrypt_field(&self.fields[ACCESS_KEY_FIELD], key.as_slice(), "access key")?;
        let secret_key =
            decrypt_field(&self.fields[SECRET_KEY_FIELD], key.as_slice(), "secret key")?;
        Credentials::from_keys(access_key, secret_key).map_err(|err| match err {
            SignError::Validation(reason) => SignError::CredentialDecode(reason),
            other => other,
        })
    }
}

/// Where a signer gets its credentials from.
#[derive(Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// A literal key pair.
    Keys {
        /// The access key.
        access_key: String,
        /// The secret key.
        secret_key: String,
    },
    /// A hex-encoded linkage code.
    LinkageCode(String),
}

impl CredentialSource {
    /// Read a credential source from the environment.
    ///
    /// `AKSK_ACCESS_KEY` and `AKSK_SECRET_KEY` take precedence when both are set
    /// and non-empty; otherwise `AKSK_LINKAGE_CODE` is used. Returns `None` when
    /// neither is available.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let non_empty = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());

        if let (Some(access_key), Some(secret_key)) =
            (non_empty("AKSK_ACCESS_KEY"), non_empty("AKSK_SECRET_KEY"))
        {
            return Some(Self::Keys {
                access_key,
                secret_key,
            });
        }
        non_empty("AKSK_LINKAGE_CODE").map(Self::LinkageCode)
    }

    /// Produce credentials from this source.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::Validation`] for an empty key pair, or
    /// [`SignError::CredentialDecode`] for an undecodable linkage code.
    pub fn resolve(&self) -> SignResult<Credentials> {
        match self {
            Self::Keys {
                access_key,
                secret_key,
            } => Credentials::from_keys(access_key.clone(), secret_key.clone()),
            Self::LinkageCode(code) => Credentials::from_linkage_code(code),
        }
    }
}

impl fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Keys { access_key, .. } => f
                .debug_struct("Keys")
                .field("access_key", access_key)
                .field("secret_key", &"<redacted>")
                .finish(),
            Self::LinkageCode(_) => f.debug_tuple("LinkageCode").field(&"<redacted>").finish(),
        }
    }
}

/// Hex-decode and decrypt one credential field.
fn decrypt_field(ciphertext_hex: &str, key: &[u8], label: &str) -> SignResult<String> {
    let mut buffer = hex::decode(ciphertext_hex)
        .map_err(|err| SignError::CredentialDecode(format!("{label} is not valid hex: {err}")))?;

    let iv = [0u8; AES_IV_LEN];
    let cipher = Aes256CbcDec::new_from_slices(key, &iv).map_err(|err| {
        SignError::CryptoConfiguration(format!("AES-256-CBC key rejected: {err}"))
    })?;
    let plaintext = cipher
        .decrypt_padded_mut::<NoPadding>(&mut buffer)
        .map_err(|_| {
            SignError::CredentialDecode(format!(
                "{label} ciphertext is not a whole number of AES blocks"
            ))
        })?;

    let text = std::str::from_utf8(plaintext)
        .map_err(|_| SignError::CredentialDecode(format!("{label} plaintext is not UTF-8")))?;
    Ok(trim_control(text).to_owned())
}

/// Strip leading and trailing characters at or below U+0020, which covers both
/// whitespace and the NUL fill of unpadded plaintexts.
fn trim_control(text: &str) -> &str {
    text.trim_matches(|c: char| c <= ' ')
}
