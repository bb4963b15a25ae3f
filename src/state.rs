//! Shared application state injected into every handler.

use std::sync::Arc;
use std::time::Duration;

use crate::application::services::AuthService;
use crate::domain::services::ReferenceService;
use crate::web::controller::TransactionController;
use crate::web::session::SessionStore;

#[derive(Clone)]
pub struct AppState {
    pub transaction_controller: Arc<TransactionController>,
    pub auth_service: Arc<AuthService>,
    pub sessions: Arc<SessionStore>,
    /// Used by the health check to probe the backend.
    pub reference_service: Arc<dyn ReferenceService>,
    /// Adds `Secure` to the session cookie.
    pub cookie_secure: bool,
}

impl AppState {
    pub fn new(
        transaction_controller: TransactionController,
        auth_service: AuthService,
        sessions: Arc<SessionStore>,
        reference_service: Arc<dyn ReferenceService>,
        cookie_secure: bool,
    ) -> Self {
        Self {
            transaction_controller: Arc::new(transaction_controller),
            auth_service: Arc::new(auth_service),
            sessions,
            reference_service,
            cookie_secure,
        }
    }

    /// Lifetime of a session cookie.
    pub fn session_ttl(&self) -> Duration {
        self.sessions.ttl()
    }
}
