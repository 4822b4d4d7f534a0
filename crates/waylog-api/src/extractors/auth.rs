//! `AuthOwner` extractor — validates the bearer JWT and injects the owner context.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use waylog_core::error::AppError;
use waylog_service::context::RequestContext;

use crate::error::ApiError;
use crate::state::AppState;

/// JWT claims carried by owner access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Owner id.
    pub sub: Uuid,
    /// Expiry, seconds since the epoch.
    pub exp: usize,
    /// Issuer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

/// Extracted authenticated owner context available in handlers.
#[derive(Debug, Clone)]
pub struct AuthOwner(pub RequestContext);

impl AuthOwner {
    /// Returns the inner `RequestContext`.
    pub fn context(&self) -> &RequestContext {
        &self.0
    }
}

impl std::ops::Deref for AuthOwner {
    type Target = RequestContext;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequestParts<AppState> for AuthOwner {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AppError::authentication("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::authentication("Invalid Authorization header format"))?;

        let mut validation = Validation::new(Algorithm::HS256);
        if !state.config.auth.jwt_issuer.is_empty() {
            validation.set_issuer(&[&state.config.auth.jwt_issuer]);
        }

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(state.config.auth.jwt_secret.as_bytes()),
            &validation,
        )
        .map_err(|_| AppError::authentication("Invalid or expired token"))?;

        Ok(AuthOwner(RequestContext {
            owner_id: data.claims.sub,
        }))
    }
}
