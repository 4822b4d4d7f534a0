//! Owner authentication configuration.
//!
//! Waylog does not issue owner credentials itself; it only verifies JWTs
//! minted by the upstream identity service.

use serde::{Deserialize, Serialize};

/// Owner JWT verification settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret shared with the identity service (HS256).
    pub jwt_secret: String,
    /// Expected `iss` claim. Empty disables issuer validation.
    #[serde(default)]
    pub jwt_issuer: String,
}
