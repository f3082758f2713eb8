//! Request signing integration tests.

#[cfg(test)]
mod tests {
    use aksk_auth::{HexCase, RequestSigner, SignError, SignRequest, SignerConfig};

    use crate::{ASSETS_AUTHORIZATION, assets_request, fixed_now, key_signer};

    #[test]
    fn test_should_sign_assets_request_known_answer() {
        let signed = key_signer().sign_at(&assets_request(), fixed_now()).expect("sign");
        assert_eq!(signed.authorization(), ASSETS_AUTHORIZATION);
    }

    #[test]
    fn test_should_produce_identical_headers_for_identical_input() {
        let signer = key_signer();
        let first = signer.sign_at(&assets_request(), fixed_now()).expect("sign");
        let second = signer.sign_at(&assets_request(), fixed_now()).expect("sign");
        assert_eq!(first, second);
    }

    #[test]
    fn test_should_ignore_whitespace_in_payload() {
        let spaced = SignRequest::builder()
            .method("POST")
            .uri("/api/xdr/v1/assets/list")
            .host("10.10.10.10")
            .query_str("page=1&pageSize=10")
            .header("content-type", "application/json")
            .header("X-Foo", "1")
            .payload(br#"{ "page" : 1 , "pageSize" : 10 }"#.to_vec())
            .build()
            .expect("build");
        let signed = key_signer().sign_at(&spaced, fixed_now()).expect("sign");
        assert_eq!(signed.authorization(), ASSETS_AUTHORIZATION);
    }

    #[test]
    fn test_should_change_signature_with_query() {
        let signer = key_signer();
        let base = signer.sign_at(&assets_request(), fixed_now()).expect("sign");
        let other = SignRequest::builder()
            .method("POST")
            .uri("/api/xdr/v1/assets/list")
            .host("10.10.10.10")
            .query_str("pageSize=20&page=1")
            .header("X-Foo", "1")
            .header("content-type", "application/json")
            .payload(br#"{"page":1,"pageSize":10}"#.to_vec())
            .build()
            .expect("build");
        let other = signer.sign_at(&other, fixed_now()).expect("sign");
        assert_ne!(base.authorization(), other.authorization());
    }

    #[test]
    fn test_should_sign_with_config_loaded_from_json() {
        let config: SignerConfig =
            serde_json::from_value(serde_json::json!({"hexCase": "upper"})).expect("config");
        assert_eq!(config.hex_case, HexCase::Upper);

        let signer = RequestSigner::with_config(key_signer().credentials().clone(), config);
        let signed = signer.sign_at(&assets_request(), fixed_now()).expect("sign");
        assert!(signed.authorization().ends_with(
            "Signature=9BB94703CF691816AAEDD6FEEAEF6FE99F8A67FE98356B4918F1E9EFDCD8367F"
        ));
    }

    #[test]
    fn test_should_stamp_current_time_when_no_sign_date_given() {
        let before = chrono::Utc::now().format("%Y%m%d").to_string();
        let signed = key_signer().sign(&assets_request()).expect("sign");
        let after = chrono::Utc::now().format("%Y%m%d").to_string();

        let date = signed.sign_date();
        assert_eq!(date.len(), "20240102T030405+0000".len());
        assert!(date.ends_with("+0000"));
        assert!(date.starts_with(&before) || date.starts_with(&after));
    }

    #[test]
    fn test_should_reject_incomplete_request() {
        let err = SignRequest::builder()
            .method("GET")
            .uri("/")
            .query_str("")
            .build()
            .unwrap_err();
        assert!(matches!(err, SignError::Validation(msg) if msg.contains("host")));
    }
}
