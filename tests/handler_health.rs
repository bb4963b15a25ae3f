mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use expman_web::api::handlers::health_handler;

#[tokio::test]
async fn test_health_endpoint_success() {
    let (state, _store) = common::create_test_state().await;
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["backend"]["status"], "ok");
    assert_eq!(json["checks"]["sessions"]["status"], "ok");
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let (state, _store) = common::create_test_state().await;
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    let json = response.json::<serde_json::Value>();

    assert!(json.get("status").is_some());
    assert!(json.get("version").is_some());
    assert!(json.get("checks").is_some());
    assert!(json["checks"].get("backend").is_some());
    assert!(json["checks"].get("sessions").is_some());
}

#[tokio::test]
async fn test_health_reports_open_sessions() {
    let (state, _store) = common::create_test_state().await;
    common::session_cookie(&state, common::CUSTOMER).await;

    let server = common::create_test_server(state);

    let response = server.get("/health").await;

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["checks"]["sessions"]["message"], "Open sessions: 1");
}
