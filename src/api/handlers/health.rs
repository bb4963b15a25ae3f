//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Backend**: Fetches the currency list from the reference service
/// 2. **Sessions**: Reports the number of open sessions
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "backend": {
///       "status": "ok",
///       "message": "4 currencies available"
///     },
///     "sessions": {
///       "status": "ok",
///       "message": "Open sessions: 2"
///     }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let backend_check = check_backend(&state).await;

    let sessions_check = check_sessions(&state).await;

    let all_healthy = backend_check.is_ok() && sessions_check.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            backend: backend_check,
            sessions: sessions_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        tracing::warn!("Health check degraded");
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

/// Checks the backend by loading reference data.
async fn check_backend(state: &AppState) -> CheckStatus {
    match state.reference_service.fetch_currency_list().await {
        Ok(currencies) if !currencies.is_empty() => {
            CheckStatus::ok(format!("{} currencies available", currencies.len()))
        }
        Ok(_) => CheckStatus::error("Currency list is empty"),
        Err(e) => CheckStatus::error(format!("Backend error: {}", e)),
    }
}

async fn check_sessions(state: &AppState) -> CheckStatus {
    CheckStatus::ok(format!("Open sessions: {}", state.sessions.len().await))
}
