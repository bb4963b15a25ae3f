#![allow(dead_code)]

use axum::http::HeaderValue;
use axum_test::TestServer;
use expman_web::application::services::hash_token;
use expman_web::config::Config;
use expman_web::domain::queries::AccountQuery;
use expman_web::domain::services::{AccountService, TransactionTypeService};
use expman_web::infrastructure::memory::MemoryStore;
use expman_web::routes::build_router;
use expman_web::server::build_state;
use expman_web::state::AppState;
use std::sync::Arc;

pub const SIGNING_SECRET: &str = "test-signing-secret";
pub const CUSTOMER: i64 = 1;
pub const CUSTOMER_TOKEN: &str = "customer-one-token";
pub const OTHER_CUSTOMER: i64 = 2;
pub const OTHER_TOKEN: &str = "customer-two-token";

pub fn test_config() -> Config {
    Config {
        listen_addr: "127.0.0.1:0".to_string(),
        log_level: "info".to_string(),
        log_format: "text".to_string(),
        behind_proxy: false,
        token_signing_secret: SIGNING_SECRET.to_string(),
        customer_tokens: vec![
            (CUSTOMER, hash_token(SIGNING_SECRET, CUSTOMER_TOKEN)),
            (OTHER_CUSTOMER, hash_token(SIGNING_SECRET, OTHER_TOKEN)),
        ],
        session_ttl_seconds: 1800,
        transaction_page_size: 20,
        seed_demo_data: true,
        cookie_secure: false,
    }
}

/// State over a seeded in-memory store, plus the store for direct inspection.
pub async fn create_test_state() -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = build_state(&test_config(), store.clone()).await;
    (state, store)
}

/// Full router without rate limiting.
pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(build_router(state, None)).unwrap()
}

/// Opens a session directly and returns the matching `Cookie` header value.
pub async fn session_cookie(state: &AppState, customer_key: i64) -> HeaderValue {
    let session_id = state.sessions.create(customer_key).await;
    HeaderValue::from_str(&format!("expman_session={}", session_id)).unwrap()
}

/// First account of the customer, in opening order ("Cash", BYN).
pub async fn first_account(store: &MemoryStore, customer_key: i64) -> i64 {
    store
        .fetch_accounts(AccountQuery { customer_key })
        .await
        .unwrap()
        .into_list()[0]
        .account_key
}

/// First transaction type of the customer by name ("Food").
pub async fn first_transaction_type(store: &MemoryStore, customer_key: i64) -> i64 {
    store
        .find_transaction_type_list_for_customer(customer_key)
        .await
        .unwrap()
        .into_list()[0]
        .transaction_type_key
}
