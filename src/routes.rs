//! Top-level router configuration combining web and health routes.
//!
//! # Route Structure
//!
//! - `GET  /health`             - Health check: backend, sessions (public)
//! - `GET|POST /login`, `/logout` - Session management (public, rate limited)
//! - `/`, `/transaction/*`      - Web UI (session cookie required)
//! - `/static/*`                - Static assets (rate limited with the pages)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Authentication** - Session cookie resolved into the caller's customer key
//! - **Path normalization** - Trailing slash handling

use crate::api::handlers::health_handler;
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use crate::web;
use crate::web::middleware::web_auth;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address;
///   enable only when the service runs behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_router(state, Some(behind_proxy)))
}

/// Builds routes and middleware without path normalization.
///
/// `limits` is `Some(behind_proxy)` to enable per-IP limiting. `None`
/// disables it for in-process clients that carry no `ConnectInfo` peer address.
pub fn build_router(state: AppState, limits: Option<bool>) -> Router {
    // Assets are nested after the auth route layer so they stay public.
    let pages = web::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            web_auth::layer,
        ))
        .nest_service("/static", ServeDir::new("static"));
    let login = web::routes::public_routes();

    let web_router = match limits {
        Some(behind_proxy) => rate_limit::apply(pages, behind_proxy, rate_limit::PAGES)
            .merge(rate_limit::apply(login, behind_proxy, rate_limit::SECURE)),
        None => pages.merge(login),
    };

    Router::new()
        .route("/health", get(health_handler))
        .merge(web_router)
        .with_state(state)
        .layer(tracing::layer())
}
