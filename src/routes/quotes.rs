//! Handlers for the quotes resource.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use validator::Validate;

use crate::errors::{AppError, FieldError};
use crate::middleware::api_key::ApiKey;
use crate::models::quote::{CreateQuote, Quote};
use crate::services::quote as quote_service;
use crate::AppState;

/// Body of a successful creation response.
#[derive(Debug, Serialize)]
pub struct QuoteCreated {
    pub status: &'static str,
    pub message: &'static str,
    pub quote: Quote,
}

/// GET /quotes — list every quote.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Quote>>, AppError> {
    let quotes = quote_service::list(&state.db).await?;
    Ok(Json(quotes))
}

/// POST /quotes — validate, trim, and insert a quote.
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateQuote>, JsonRejection>,
) -> Result<(StatusCode, Json<QuoteCreated>), AppError> {
    let Json(body) = payload
        .map_err(|rejection| AppError::Validation(vec![FieldError::body(rejection.body_text())]))?;

    let input = body.trimmed();
    input.validate().map_err(AppError::from_validation)?;

    let quote = quote_service::create(&state.db, &input.author, &input.quote).await?;
    tracing::info!(id = quote.id, "Quote added");

    Ok((
        StatusCode::CREATED,
        Json(QuoteCreated {
            status: "success",
            message: "Quote added.",
            quote,
        }),
    ))
}

/// DELETE /quotes/{id} — remove a quote, gated by the apiKey header.
///
/// Idempotent: deleting an id that no longer exists still returns 204.
pub async fn remove(
    State(state): State<AppState>,
    _auth: ApiKey,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let removed = quote_service::delete(&state.db, id).await?;
    tracing::debug!(id, removed, "Quote delete processed");
    Ok(StatusCode::NO_CONTENT)
}
