//! Signer configuration.
//!
//! Provides [`SignerConfig`] for the knobs that must agree with the verifying
//! server. Values can be loaded from environment variables.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::constants::DEFAULT_CONTENT_TYPE;

/// Letter case used when rendering digests and signatures as hex.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HexCase {
    /// `0-9a-f`.
    #[default]
    Lower,
    /// `0-9A-F`, as produced by the existing client SDKs.
    Upper,
}

impl HexCase {
    /// Hex-encode `bytes` in this case.
    #[must_use]
    pub fn encode(self, bytes: impl AsRef<[u8]>) -> String {
        match self {
            Self::Lower => hex::encode(bytes),
            Self::Upper => hex::encode_upper(bytes),
        }
    }
}

impl FromStr for HexCase {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lower" => Ok(Self::Lower),
            "upper" => Ok(Self::Upper),
            other => Err(format!("unknown hex case: {other}")),
        }
    }
}

/// How a generated `sign-date` renders the UTC offset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignDateStyle {
    /// `20240102T030405+0000`.
    #[default]
    Offset,
    /// `20240102T030405Z`.
    Zulu,
}

impl SignDateStyle {
    /// The `chrono` format string for this style.
    #[must_use]
    pub fn pattern(self) -> &'static str {
        match self {
            Self::Offset => "%Y%m%dT%H%M%S%z",
            Self::Zulu => "%Y%m%dT%H%M%SZ",
        }
    }
}

impl FromStr for SignDateStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "offset" => Ok(Self::Offset),
            "zulu" => Ok(Self::Zulu),
            other => Err(format!("unknown sign-date style: {other}")),
        }
    }
}

/// Signer configuration.
///
/// # Examples
///
/// ```
/// use aksk_auth::{HexCase, SignerConfig};
///
/// let config = SignerConfig::builder().hex_case(HexCase::Upper).build();
/// assert_eq!(config.default_content_type, "application/json");
/// assert_eq!(config.hex_case, HexCase::Upper);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase", default)]
pub struct SignerConfig {
    /// Value written to `sdk-content-type` when the caller sets none.
    #[builder(default = String::from(DEFAULT_CONTENT_TYPE), setter(into))]
    pub default_content_type: String,

    /// Case of the payload hash, canonical request hash and signature.
    #[builder(default)]
    pub hex_case: HexCase,

    /// Rendering of generated `sign-date` values.
    #[builder(default)]
    pub sign_date_style: SignDateStyle,
}

impl Default for SignerConfig {
    fn default() -> Self {
        Self {
            default_content_type: String::from(DEFAULT_CONTENT_TYPE),
            hex_case: HexCase::default(),
            sign_date_style: SignDateStyle::default(),
        }
    }
}

impl SignerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Default |
    /// |----------|---------|
    /// | `AKSK_DEFAULT_CONTENT_TYPE` | `application/json` |
    /// | `AKSK_HEX_CASE` | `lower` |
    /// | `AKSK_SIGN_DATE_STYLE` | `offset` |
    ///
    /// Unrecognized values keep the default.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("AKSK_DEFAULT_CONTENT_TYPE") {
            config.default_content_type = v;
        }
        if let Ok(v) = std::env::var("AKSK_HEX_CASE") {
            config.hex_case = parse_or_default(&v, "AKSK_HEX_CASE");
        }
        if let Ok(v) = std::env::var("AKSK_SIGN_DATE_STYLE") {
            config.sign_date_style = parse_or_default(&v, "AKSK_SIGN_DATE_STYLE");
        }

        config
    }
}

fn parse_or_default<T: FromStr<Err = String> + Default>(value: &str, variable: &str) -> T {
    value.parse().unwrap_or_else(|err| {
        tracing::warn!(variable, %err, "Ignoring invalid configuration value");
        T::default()
    })
}
