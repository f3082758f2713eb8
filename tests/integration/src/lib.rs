//! End-to-end tests for AK/SK request signing.
//!
//! These exercise the public API only: credentials in, signed headers out.
//!
//! Run them with:
//! ```text
//! cargo test -p aksk-integration
//! ```

use std::sync::Once;

use aksk_auth::{Credentials, RequestSigner, SignRequest};
use chrono::{DateTime, TimeZone, Utc};

static INIT: Once = Once::new();

/// Access key used across the tests.
pub const ACCESS_KEY: &str = "AK-EXAMPLE-0001";

/// Secret key used across the tests.
pub const SECRET_KEY: &str = "SK-EXAMPLE-SECRET";

/// A linkage code that decodes to [`ACCESS_KEY`] and [`SECRET_KEY`].
pub const LINKAGE_CODE: &str = "636c69656e742d3030317c31302e31302e31302e31307c64656d6f2d636c69656e747c7864727c332e302e317c3139322e3136382e312e32307c726561642c77726974657c6578747c646573637c32346331386661366663663731313931373866313739383836636461633361387c373565666639383566653938383232306364313136653938616264653033356236323039663363623334336663346362383235623037333734616331633231367c76317c3434337c";

/// The `Authorization` value for [`assets_request`] signed at [`fixed_now`].
pub const ASSETS_AUTHORIZATION: &str = "algorithm=HMAC-SHA256, Access=AK-EXAMPLE-0001, \
     SignedHeaders=content-type;sdk-content-type;sdk-host;sign-date;X-Foo, \
     Signature=9f987edc77002b40dc8d82c954e68cc9b7bce0125317aca43668392618ec86d9";

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Create a signer bound to the test key pair.
#[must_use]
pub fn key_signer() -> RequestSigner {
    init_tracing();
    RequestSigner::new(
        Credentials::from_keys(ACCESS_KEY, SECRET_KEY).unwrap_or_else(|err| panic!("{err}")),
    )
}

/// Create a signer from the test linkage code.
#[must_use]
pub fn linkage_signer() -> RequestSigner {
    init_tracing();
    RequestSigner::from_linkage_code(LINKAGE_CODE).unwrap_or_else(|err| panic!("{err}"))
}

/// 2024-01-02T03:04:05Z.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5)
        .single()
        .unwrap_or_else(|| panic!("valid timestamp"))
}

/// The asset listing request used for known-answer checks.
#[must_use]
pub fn assets_request() -> SignRequest {
    let body = serde_json::json!({"page": 1, "pageSize": 10});
    SignRequest::builder()
        .method("POST")
        .uri("/api/xdr/v1/assets/list")
        .host("10.10.10.10")
        .query_str("pageSize=10&page=1")
        .header("X-Foo", "1")
        .header("content-type", "application/json")
        .payload(body.to_string())
        .build()
        .unwrap_or_else(|err| panic!("{err}"))
}

mod test_concurrency;
mod test_http;
mod test_linkage;
mod test_signing;
