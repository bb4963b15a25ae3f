//! HTTP server initialization and runtime setup.
//!
//! Handles backend setup, demo seeding, the session sweeper, and the Axum
//! server lifecycle.

use crate::application::services::AuthService;
use crate::config::Config;
use crate::infrastructure::memory::{MemoryStore, MemoryTokenRepository};
use crate::routes::app_router;
use crate::state::AppState;
use crate::web::controller::TransactionController;
use crate::web::session::{SessionStore, run_session_sweeper};

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// How often expired sessions are purged.
const SESSION_SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Assembles the application state on top of an in-memory backend.
///
/// Seeds demo data for every customer with a login token when `seed_demo_data`
/// is enabled.
pub async fn build_state(config: &Config, store: Arc<MemoryStore>) -> AppState {
    let token_repository = Arc::new(MemoryTokenRepository::new(
        config.customer_tokens.iter().cloned(),
    ));

    if config.seed_demo_data {
        let customers = token_repository.customer_keys().await;
        for customer_key in &customers {
            store.seed_demo_customer(*customer_key).await;
        }
        tracing::info!(customers = customers.len(), "Demo data seeded");
    }

    let transaction_controller = TransactionController::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
    )
    .with_page_size(config.transaction_page_size);

    let auth_service = AuthService::new(token_repository, config.token_signing_secret.clone());
    let sessions = Arc::new(SessionStore::new(config.session_ttl()));

    AppState::new(
        transaction_controller,
        auth_service,
        sessions,
        store,
        config.cookie_secure,
    )
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - In-memory backend (optionally seeded)
/// - Background session sweeper
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - The listen address is invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = Arc::new(MemoryStore::new());
    tracing::info!("In-memory backend ready");

    let state = build_state(&config, store).await;

    tokio::spawn(run_session_sweeper(
        state.sessions.clone(),
        SESSION_SWEEP_INTERVAL,
    ));
    tracing::info!("Session sweeper started");

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
