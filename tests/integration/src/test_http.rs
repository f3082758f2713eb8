//! `http::Request` signing integration tests.

#[cfg(test)]
mod tests {
    use aksk_auth::{SignError, sign_http_request, sign_http_request_at};

    use crate::{fixed_now, key_signer, linkage_signer};

    fn assets_http_request() -> http::Request<Vec<u8>> {
        http::Request::builder()
            .method("POST")
            .uri("https://10.10.10.10:8443/api/xdr/v1/assets/list?pageSize=10&page=1")
            .header("X-Foo", "1")
            .header("content-type", "application/json")
            .header("sign-date", "20240102T030405+0000")
            .body(br#"{"page": 1, "pageSize": 10}"#.to_vec())
            .expect("request")
    }

    #[test]
    fn test_should_attach_signed_headers_to_http_request() {
        let mut request = assets_http_request();
        sign_http_request_at(&linkage_signer(), &mut request, fixed_now()).expect("sign");

        let headers = request.headers();
        assert_eq!(
            headers[http::header::AUTHORIZATION],
            "algorithm=HMAC-SHA256, Access=AK-EXAMPLE-0001, \
             SignedHeaders=content-type;sdk-content-type;sdk-host;sign-date;x-foo, \
             Signature=3caa1a274fd7553fb2814cf1893eae3e81f1a0ee53ff5b4caeb657276d2d924e"
        );
        assert_eq!(headers["sdk-host"], "10.10.10.10:8443");
        assert_eq!(headers["x-foo"], "1");
    }

    #[test]
    fn test_should_sign_http_request_with_current_time() {
        let mut request = http::Request::builder()
            .method("GET")
            .uri("https://10.10.10.10/api/xdr/v1/alerts?page=1")
            .body(Vec::<u8>::new())
            .expect("request");
        let signed = sign_http_request(&key_signer(), &mut request).expect("sign");
        assert_eq!(request.headers()["sign-date"], signed.sign_date());
    }

    #[test]
    fn test_should_reject_trace_method() {
        let mut request = http::Request::builder()
            .method("TRACE")
            .uri("https://10.10.10.10/")
            .body(Vec::<u8>::new())
            .expect("request");
        let err = sign_http_request(&key_signer(), &mut request).unwrap_err();
        assert!(matches!(err, SignError::UnsupportedMethod(_)));
    }
}
