//! Local/dev signed URL provider.
//!
//! Signs `{base}/{bucket}/{path}?exp=<unix>&sig=<hex>` where the signature
//! covers bucket, path, and expiry under a configured secret. The serving
//! side (a static file host or reverse proxy) re-derives and checks the
//! signature; that half lives outside this repository.

use std::time::Duration;

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use waylog_core::config::storage::LocalStorageConfig;
use waylog_core::result::AppResult;
use waylog_core::traits::UrlSigner;

/// Signed URL provider for single-node deployments.
#[derive(Debug, Clone)]
pub struct LocalUrlSigner {
    base_url: String,
    secret: String,
}

impl LocalUrlSigner {
    /// Create a new local signer from configuration.
    pub fn new(config: &LocalStorageConfig) -> Self {
        Self {
            base_url: config.public_base_url.trim_end_matches('/').to_string(),
            secret: config.signing_secret.clone(),
        }
    }

    fn signature(&self, bucket: &str, path: &str, expires_unix: i64) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.secret.as_bytes());
        hasher.update(b"|");
        hasher.update(bucket.as_bytes());
        hasher.update(b"|");
        hasher.update(path.as_bytes());
        hasher.update(b"|");
        hasher.update(expires_unix.to_string().as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[async_trait]
impl UrlSigner for LocalUrlSigner {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn signed_url(&self, bucket: &str, path: &str, ttl: Duration) -> AppResult<String> {
        // Sign the normalized path so a verifier re-deriving the signature
        // from the URL sees the same bytes.
        let path = path.trim_start_matches('/');
        let expires_unix = chrono::Utc::now().timestamp() + ttl.as_secs() as i64;
        let sig = self.signature(bucket, path, expires_unix);
        Ok(format!(
            "{}/{bucket}/{path}?exp={expires_unix}&sig={sig}",
            self.base_url
        ))
    }
}
