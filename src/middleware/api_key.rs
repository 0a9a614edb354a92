//! Shared-secret `apiKey` header gate for privileged routes.

use axum::{extract::FromRequestParts, http::request::Parts};
use subtle::ConstantTimeEq;

use crate::errors::AppError;
use crate::AppState;

/// Extractor that admits a request only when its `apiKey` header equals the
/// configured secret. Comparison is constant-time.
///
/// ```ignore
/// async fn handler(_auth: ApiKey, ...) -> Result<_, AppError> { ... }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct ApiKey;

impl FromRequestParts<AppState> for ApiKey {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let provided = parts
            .headers
            .get("apiKey")
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        if provided
            .as_bytes()
            .ct_eq(state.config.api_key.as_bytes())
            .into()
        {
            Ok(ApiKey)
        } else {
            tracing::debug!("Rejected request with mismatched apiKey header");
            Err(AppError::Unauthorized)
        }
    }
}
