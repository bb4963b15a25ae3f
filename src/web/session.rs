//! Browser sessions and per-session transaction list state.
//!
//! A session is created at login and identified by a random id stored in the
//! `expman_session` cookie. It carries the customer key (the security context
//! of every protected request) and the [`TransactionListSession`] that the list
//! page reads and the controller replaces.
//!
//! # Lifecycle
//!
//! 1. Login creates a [`WebSession`] with an expiry `ttl` from now
//! 2. Each authenticated request slides the expiry forward
//! 3. Logout removes it; expired sessions are evicted on access and by
//!    [`run_session_sweeper`]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderMap, header::COOKIE};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::json;
use tokio::sync::RwLock;

use crate::domain::entities::TransactionTO;
use crate::error::AppError;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "expman_session";

const SESSION_ID_LEN: usize = 48;

/// Pagination cursor shown on the list page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paginator {
    pub current_page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

impl Default for Paginator {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_size: 0,
            total_pages: 0,
        }
    }
}

impl Paginator {
    /// Page numbers `1..=total_pages`.
    pub fn pages(&self) -> Vec<u32> {
        (1..=self.total_pages).collect()
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// Last fetched transaction list and its pagination cursor.
///
/// Passed into the list operation and returned updated; the session store
/// keeps the returned value until the next list request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransactionListSession {
    pub transactions: Vec<TransactionTO>,
    pub paginator: Paginator,
    pub initialized: bool,
}

/// Server-side state of one logged-in browser.
#[derive(Debug, Clone)]
pub struct WebSession {
    pub customer_key: i64,
    pub transaction_list: TransactionListSession,
    pub expires_at: DateTime<Utc>,
}

/// Security context of an authenticated request.
///
/// Inserted into request extensions by [`crate::web::middleware::web_auth`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentCustomer {
    pub customer_key: i64,
    pub session_id: String,
}

impl CurrentCustomer {
    pub fn customer_key(&self) -> i64 {
        self.customer_key
    }
}

/// Generates a random alphanumeric session id.
pub fn generate_session_id() -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

    let mut rng = rand::rng();

    (0..SESSION_ID_LEN)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// In-memory session registry.
#[derive(Debug)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, WebSession>>,
    ttl: Duration,
}

impl SessionStore {
    /// Creates an empty store whose sessions live `ttl` past their last use.
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn expiry_from_now(&self) -> DateTime<Utc> {
        Utc::now() + chrono::Duration::from_std(self.ttl).unwrap_or(chrono::Duration::MAX)
    }

    /// Opens a session for `customer_key` and returns its id.
    pub async fn create(&self, customer_key: i64) -> String {
        let session_id = generate_session_id();
        let session = WebSession {
            customer_key,
            transaction_list: TransactionListSession::default(),
            expires_at: self.expiry_from_now(),
        };

        self.sessions
            .write()
            .await
            .insert(session_id.clone(), session);

        tracing::info!(customer_key, "Session opened");

        session_id
    }

    /// Resolves a live session to its customer key and slides its expiry.
    ///
    /// Expired sessions are removed and yield `None`.
    pub async fn resolve(&self, session_id: &str) -> Option<i64> {
        let mut sessions = self.sessions.write().await;
        let now = Utc::now();

        match sessions.get_mut(session_id) {
            Some(session) if session.expires_at > now => {
                session.expires_at = self.expiry_from_now();
                Some(session.customer_key)
            }
            Some(_) => {
                sessions.remove(session_id);
                tracing::debug!("Session expired");
                None
            }
            None => None,
        }
    }

    /// Current list state of a session; a fresh default if the session is gone.
    pub async fn transaction_list(&self, session_id: &str) -> TransactionListSession {
        self.sessions
            .read()
            .await
            .get(session_id)
            .map(|s| s.transaction_list.clone())
            .unwrap_or_default()
    }

    /// Replaces the list state of a session.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the session ended meanwhile.
    pub async fn store_transaction_list(
        &self,
        session_id: &str,
        transaction_list: TransactionListSession,
    ) -> Result<(), AppError> {
        let mut sessions = self.sessions.write().await;

        let session = sessions.get_mut(session_id).ok_or_else(|| {
            AppError::not_found("Session not found", json!({"reason": "Session ended"}))
        })?;
        session.transaction_list = transaction_list;

        Ok(())
    }

    /// Ends a session. Returns whether it existed.
    pub async fn remove(&self, session_id: &str) -> bool {
        self.sessions.write().await.remove(session_id).is_some()
    }

    /// Drops every expired session and returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let now = Utc::now();
        let before = sessions.len();
        sessions.retain(|_, s| s.expires_at > now);
        before - sessions.len()
    }

    /// Number of sessions currently held, expired or not.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

/// Periodically evicts expired sessions until the store is dropped elsewhere
/// and this task is aborted with the runtime.
pub async fn run_session_sweeper(store: Arc<SessionStore>, every: Duration) {
    let mut interval = tokio::time::interval(every);
    // The first tick completes immediately.
    interval.tick().await;

    loop {
        interval.tick().await;
        let removed = store.purge_expired().await;
        if removed > 0 {
            tracing::info!(removed, "Expired sessions purged");
        }
    }
}

/// Extracts the session id from the `Cookie` header.
///
/// Handles multiple cookies separated by semicolons and ignores the others.
pub fn session_id_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get(COOKIE)
        .and_then(|cookie_header| cookie_header.to_str().ok())
        .and_then(|cookie_str| {
            cookie_str.split(';').find_map(|cookie| {
                let mut parts = cookie.trim().splitn(2, '=');
                match (parts.next(), parts.next()) {
                    (Some(SESSION_COOKIE), Some(value)) if !value.is_empty() => {
                        Some(value.to_string())
                    }
                    _ => None,
                }
            })
        })
}

/// `Set-Cookie` value establishing a session.
pub fn session_cookie(session_id: &str, max_age: Duration, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE,
        session_id,
        max_age.as_secs()
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value removing the session cookie.
pub fn expired_session_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_generate_session_id() {
        let a = generate_session_id();
        let b = generate_session_id();

        assert_eq!(a.len(), SESSION_ID_LEN);
        assert!(a.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_ne!(a, b);
    }

    #[test]
    fn test_paginator_navigation() {
        let paginator = Paginator {
            current_page: 1,
            page_size: 20,
            total_pages: 3,
        };

        assert_eq!(paginator.pages(), vec![1, 2, 3]);
        assert!(!paginator.has_previous());
        assert!(paginator.has_next());
    }

    #[tokio::test]
    async fn test_create_and_resolve() {
        let store = SessionStore::new(Duration::from_secs(60));

        let id = store.create(9).await;

        assert_eq!(store.resolve(&id).await, Some(9));
        assert_eq!(store.resolve("unknown").await, None);
    }

    #[tokio::test]
    async fn test_zero_ttl_session_expires() {
        let store = SessionStore::new(Duration::ZERO);

        let id = store.create(9).await;

        assert_eq!(store.resolve(&id).await, None);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_purge_expired() {
        let store = SessionStore::new(Duration::ZERO);
        store.create(1).await;
        store.create(2).await;

        assert_eq!(store.purge_expired().await, 2);
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_transaction_list_round_trip() {
        let store = SessionStore::new(Duration::from_secs(60));
        let id = store.create(1).await;

        let fresh = store.transaction_list(&id).await;
        assert!(!fresh.initialized);

        let updated = TransactionListSession {
            initialized: true,
            ..fresh
        };
        store
            .store_transaction_list(&id, updated.clone())
            .await
            .unwrap();

        assert_eq!(store.transaction_list(&id).await, updated);
    }

    #[tokio::test]
    async fn test_store_transaction_list_after_logout() {
        let store = SessionStore::new(Duration::from_secs(60));
        let id = store.create(1).await;
        assert!(store.remove(&id).await);

        let result = store
            .store_transaction_list(&id, TransactionListSession::default())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[test]
    fn test_session_id_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; expman_session=abc123; lang=en"),
        );

        assert_eq!(session_id_from_headers(&headers), Some("abc123".to_string()));
    }

    #[test]
    fn test_session_id_missing_or_empty() {
        let mut headers = HeaderMap::new();
        assert_eq!(session_id_from_headers(&headers), None);

        headers.insert(COOKIE, HeaderValue::from_static("expman_session="));
        assert_eq!(session_id_from_headers(&headers), None);
    }

    #[test]
    fn test_session_cookie_format() {
        let cookie = session_cookie("abc", Duration::from_secs(1800), true);
        assert_eq!(
            cookie,
            "expman_session=abc; Path=/; HttpOnly; SameSite=Lax; Max-Age=1800; Secure"
        );
        assert!(expired_session_cookie().contains("Max-Age=0"));
    }
}
