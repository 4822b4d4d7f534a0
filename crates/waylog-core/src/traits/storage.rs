//! Storage collaborator seam: time-limited signed URLs for media objects.

use std::time::Duration;

use async_trait::async_trait;

use crate::result::AppResult;

/// Trait for object storage backends that can mint time-limited read URLs.
///
/// The trait is defined here in `waylog-core` and implemented in
/// `waylog-storage`. The redaction serializer is the only consumer; it never
/// reads object bytes, it only hands out URLs bounded by `ttl`.
#[async_trait]
pub trait UrlSigner: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "s3").
    fn provider_type(&self) -> &str;

    /// Mint a signed read URL for `path` inside `bucket`, valid for `ttl`.
    async fn signed_url(&self, bucket: &str, path: &str, ttl: Duration) -> AppResult<String>;
}
