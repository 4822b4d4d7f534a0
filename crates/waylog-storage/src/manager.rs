//! Provider selection from configuration.

use std::sync::Arc;

use waylog_core::config::storage::StorageConfig;
use waylog_core::error::AppError;
use waylog_core::result::AppResult;
use waylog_core::traits::UrlSigner;

use crate::providers::LocalUrlSigner;

/// Builds the configured [`UrlSigner`] and owns the media bucket name.
#[derive(Debug, Clone)]
pub struct StorageManager {
    signer: Arc<dyn UrlSigner>,
    media_bucket: String,
}

impl StorageManager {
    /// Initialize the configured provider.
    pub async fn new(config: &StorageConfig) -> AppResult<Self> {
        let signer: Arc<dyn UrlSigner> = match config.provider.as_str() {
            "local" => Arc::new(LocalUrlSigner::new(&config.local)),
            #[cfg(feature = "s3")]
            "s3" => Arc::new(crate::providers::S3UrlSigner::new(&config.s3).await?),
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown storage provider: {other}"
                )));
            }
        };

        tracing::info!(provider = signer.provider_type(), "Storage signer ready");

        Ok(Self {
            signer,
            media_bucket: config.media_bucket.clone(),
        })
    }

    /// The configured URL signer.
    pub fn signer(&self) -> Arc<dyn UrlSigner> {
        Arc::clone(&self.signer)
    }

    /// Bucket holding media objects.
    pub fn media_bucket(&self) -> &str {
        &self.media_bucket
    }
}
