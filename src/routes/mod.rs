//! Router construction: routes plus the cross-cutting policy layers.

pub mod health;
pub mod quotes;

use std::time::Duration;

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::middleware::rate_limit::{rate_limit, RateLimiter};
use crate::AppState;

/// Rolling window shared by both rate limits.
const RATE_LIMIT_WINDOW: Duration = Duration::from_secs(60);
/// Requests allowed per client per window across all quotes routes.
const GLOBAL_RATE_LIMIT: usize = 5;
/// Creation requests allowed per client per window, enforced independently.
const CREATE_RATE_LIMIT: usize = 1;

/// Maximum accepted JSON request body.
const BODY_LIMIT_BYTES: usize = 64 * 1024;

/// Build the application router.
///
/// The quotes routes sit behind both rate limiters; health probes are merged
/// outside the limiters so orchestrator probes cannot starve real clients.
/// Policy layers (tracing, CORS, security headers, compression, body limit)
/// wrap everything.
pub fn build_router(state: AppState) -> Router {
    let global_limiter = RateLimiter::new(GLOBAL_RATE_LIMIT, RATE_LIMIT_WINDOW);
    let create_limiter = RateLimiter::new(CREATE_RATE_LIMIT, RATE_LIMIT_WINDOW);

    let quote_routes = Router::new()
        .route("/quotes", get(quotes::list))
        .route(
            "/quotes",
            post(quotes::create).route_layer(middleware::from_fn_with_state(
                create_limiter,
                rate_limit,
            )),
        )
        .route("/quotes/{id}", delete(quotes::remove))
        .layer(middleware::from_fn_with_state(global_limiter, rate_limit));

    let health_routes = Router::new()
        .route("/health/live", get(health::live))
        .route("/health/ready", get(health::ready));

    Router::new()
        .merge(quote_routes)
        .merge(health_routes)
        .with_state(state.clone())
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(&state.config))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(CompressionLayer::new())
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
}

/// Build the CORS layer.
///
/// Production restricts browser origins to the single configured origin;
/// anything else allows any origin. Browser-only convenience: this does not
/// protect against curl or other non-browser clients.
fn build_cors_layer(config: &AppConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("apikey")]);

    if config.environment.is_production() {
        match config.allowed_origin.parse::<HeaderValue>() {
            Ok(origin) => cors.allow_origin(origin),
            Err(e) => {
                tracing::warn!(error = %e, origin = %config.allowed_origin,
                    "Invalid ALLOWED_ORIGIN, cross-origin requests will be refused");
                cors
            }
        }
    } else {
        cors.allow_origin(Any)
    }
}
