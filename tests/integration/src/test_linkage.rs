//! Linkage code integration tests.

#[cfg(test)]
mod tests {
    use aksk_auth::{CredentialSource, LinkageCode, RequestSigner, SignError, SignerConfig};

    use crate::{
        ACCESS_KEY, ASSETS_AUTHORIZATION, LINKAGE_CODE, SECRET_KEY, assets_request, fixed_now,
        key_signer, linkage_signer,
    };

    #[test]
    fn test_should_sign_identically_from_linkage_code_and_keys() {
        let from_code = linkage_signer().sign_at(&assets_request(), fixed_now()).expect("sign");
        let from_keys = key_signer().sign_at(&assets_request(), fixed_now()).expect("sign");
        assert_eq!(from_code.authorization(), from_keys.authorization());
        assert_eq!(from_code.authorization(), ASSETS_AUTHORIZATION);
    }

    #[test]
    fn test_should_resolve_linkage_code_source() {
        let source = CredentialSource::LinkageCode(LINKAGE_CODE.to_owned());
        let signer = RequestSigner::from_source(&source, SignerConfig::default()).expect("signer");
        assert_eq!(signer.credentials().access_key(), ACCESS_KEY);
        assert_eq!(signer.credentials().secret_key(), SECRET_KEY);
    }

    #[test]
    fn test_should_not_leak_secrets_in_debug_output() {
        let signer = linkage_signer();
        let rendered = format!("{signer:?}");
        assert!(!rendered.contains(SECRET_KEY));

        let source = CredentialSource::LinkageCode(LINKAGE_CODE.to_owned());
        assert!(!format!("{source:?}").contains(LINKAGE_CODE));
    }

    #[test]
    fn test_should_reject_thirteen_field_code() {
        // Drop the trailing empty field: hex of "|" is "7c".
        let truncated = LINKAGE_CODE.strip_suffix("7c").expect("trailing separator");
        let err = RequestSigner::from_linkage_code(truncated).unwrap_err();
        assert!(matches!(err, SignError::CredentialDecode(_)));
        assert!(LinkageCode::parse(truncated).is_err());
    }

    #[test]
    fn test_should_reject_non_hex_code() {
        let err = RequestSigner::from_linkage_code("not-a-linkage-code").unwrap_err();
        assert!(matches!(err, SignError::CredentialDecode(_)));
    }
}
