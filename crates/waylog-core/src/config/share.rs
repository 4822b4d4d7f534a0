//! Share-link configuration: signed URL validity and public rate limits.

use serde::{Deserialize, Serialize};

/// Share-link subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareConfig {
    /// Validity window for media signed URLs, in seconds.
    #[serde(default = "default_signed_url_ttl")]
    pub signed_url_ttl_seconds: u64,
    /// Maximum public redemption requests per window and key.
    #[serde(default = "default_rate_limit_max")]
    pub rate_limit_max_requests: u32,
    /// Rate-limit window length in seconds.
    #[serde(default = "default_rate_limit_window")]
    pub rate_limit_window_seconds: u64,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            signed_url_ttl_seconds: default_signed_url_ttl(),
            rate_limit_max_requests: default_rate_limit_max(),
            rate_limit_window_seconds: default_rate_limit_window(),
        }
    }
}

fn default_signed_url_ttl() -> u64 {
    3600
}

fn default_rate_limit_max() -> u32 {
    60
}

fn default_rate_limit_window() -> u64 {
    60
}
