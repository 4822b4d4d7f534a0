//! Object storage configuration for signed media URLs.

use serde::{Deserialize, Serialize};

/// Top-level storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// URL signer provider to use: `"local"` or `"s3"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Bucket holding media objects.
    #[serde(default = "default_media_bucket")]
    pub media_bucket: String,
    /// Local/dev signer configuration.
    #[serde(default)]
    pub local: LocalStorageConfig,
    /// S3-compatible storage configuration.
    #[serde(default)]
    pub s3: S3StorageConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            media_bucket: default_media_bucket(),
            local: LocalStorageConfig::default(),
            s3: S3StorageConfig::default(),
        }
    }
}

/// Local/dev signed URL configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalStorageConfig {
    /// Public base URL the signed paths are appended to.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: String,
    /// Secret used to sign URL expiry parameters.
    #[serde(default)]
    pub signing_secret: String,
}

impl Default for LocalStorageConfig {
    fn default() -> Self {
        Self {
            public_base_url: default_public_base_url(),
            signing_secret: String::new(),
        }
    }
}

/// S3-compatible object storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct S3StorageConfig {
    /// S3 endpoint URL (for non-AWS services like MinIO).
    #[serde(default)]
    pub endpoint: String,
    /// AWS region.
    #[serde(default = "default_region")]
    pub region: String,
    /// Access key ID.
    #[serde(default)]
    pub access_key: String,
    /// Secret access key.
    #[serde(default)]
    pub secret_key: String,
}

fn default_provider() -> String {
    "local".to_string()
}

fn default_media_bucket() -> String {
    "waylog-media".to_string()
}

fn default_public_base_url() -> String {
    "http://localhost:8080/media".to_string()
}

fn default_region() -> String {
    "us-east-1".to_string()
}
