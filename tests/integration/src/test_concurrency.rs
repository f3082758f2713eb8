//! Shared-signer integration tests.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{ASSETS_AUTHORIZATION, assets_request, fixed_now, key_signer};

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_should_sign_concurrently_with_shared_signer() {
        let signer = Arc::new(key_signer());

        let handles: Vec<_> = (0..32)
            .map(|_| {
                let signer = Arc::clone(&signer);
                tokio::spawn(async move {
                    signer
                        .sign_at(&assets_request(), fixed_now())
                        .map(|signed| signed.authorization().to_owned())
                })
            })
            .collect();

        for handle in handles {
            let authorization = handle.await.expect("join").expect("sign");
            assert_eq!(authorization, ASSETS_AUTHORIZATION);
        }
    }
}
