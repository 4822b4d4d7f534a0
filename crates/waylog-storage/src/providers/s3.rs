//! S3-compatible presigned URL provider (requires the `s3` feature).

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::presigning::PresigningConfig;

use waylog_core::config::storage::S3StorageConfig;
use waylog_core::error::{AppError, ErrorKind};
use waylog_core::result::AppResult;
use waylog_core::traits::UrlSigner;

/// Presigned-GET URL provider backed by S3 or an S3-compatible service.
#[derive(Debug, Clone)]
pub struct S3UrlSigner {
    client: Client,
}

impl S3UrlSigner {
    /// Create a new S3 signer from configuration.
    pub async fn new(config: &S3StorageConfig) -> AppResult<Self> {
        tracing::info!(
            endpoint = %config.endpoint,
            region = %config.region,
            "Initializing S3 URL signer"
        );

        let credentials = Credentials::new(
            config.access_key.clone(),
            config.secret_key.clone(),
            None,
            None,
            "waylog-config",
        );

        let mut builder = aws_sdk_s3::config::Builder::new()
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .behavior_version(aws_sdk_s3::config::BehaviorVersion::latest());

        if !config.endpoint.is_empty() {
            builder = builder.endpoint_url(&config.endpoint).force_path_style(true);
        }

        Ok(Self {
            client: Client::from_conf(builder.build()),
        })
    }
}

#[async_trait]
impl UrlSigner for S3UrlSigner {
    fn provider_type(&self) -> &str {
        "s3"
    }

    async fn signed_url(&self, bucket: &str, path: &str, ttl: Duration) -> AppResult<String> {
        let presigning = PresigningConfig::expires_in(ttl).map_err(|e| {
            AppError::with_source(ErrorKind::Storage, "Invalid presigning TTL", e)
        })?;

        let request = self
            .client
            .get_object()
            .bucket(bucket)
            .key(path)
            .presigned(presigning)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Failed to presign media URL", e)
            })?;

        Ok(request.uri().to_string())
    }
}
