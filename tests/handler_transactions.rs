mod common;

use axum::http::{StatusCode, header};
use expman_web::domain::queries::{TransactionCreateQuery, TransactionListQuery};
use expman_web::domain::services::TransactionService;
use expman_web::infrastructure::memory::MemoryStore;
use rust_decimal::Decimal;

async fn record(store: &MemoryStore, customer_key: i64, description: &str) -> i64 {
    let query = TransactionCreateQuery {
        customer_key,
        account_key: Some(common::first_account(store, customer_key).await),
        transaction_type_key: Some(common::first_transaction_type(store, customer_key).await),
        amount: Some(Decimal::new(1250, 2)),
        description: description.to_string(),
        ..Default::default()
    };

    store
        .create_transaction(query)
        .await
        .unwrap()
        .into_result()
        .unwrap()
        .transaction_key
}

#[tokio::test]
async fn test_protected_pages_redirect_to_login() {
    let (state, _store) = common::create_test_state().await;
    let server = common::create_test_server(state);

    for path in ["/transaction/list", "/transaction/create", "/transaction/delete/1"] {
        let response = server.get(path).await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header("location"), "/login");
    }
}

#[tokio::test]
async fn test_list_shows_customer_transactions() {
    let (state, store) = common::create_test_state().await;
    record(&store, common::CUSTOMER, "Weekly groceries").await;
    record(&store, common::OTHER_CUSTOMER, "Someone else's lunch").await;
    let cookie = common::session_cookie(&state, common::CUSTOMER).await;
    let server = common::create_test_server(state);

    let response = server
        .get("/transaction/list")
        .add_header(header::COOKIE, cookie)
        .await;

    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("Weekly groceries"));
    assert!(!body.contains("Someone else"));
    assert!(body.contains("-12.50"));
}

#[tokio::test]
async fn test_list_stores_pagination_in_session() {
    let (state, store) = common::create_test_state().await;
    record(&store, common::CUSTOMER, "Bus ticket").await;
    let cookie = common::session_cookie(&state, common::CUSTOMER).await;
    let session_id = cookie
        .to_str()
        .unwrap()
        .trim_start_matches("expman_session=")
        .to_string();
    let sessions = state.sessions.clone();
    let server = common::create_test_server(state);

    let response = server
        .get("/transaction/list")
        .add_header(header::COOKIE, cookie)
        .await;

    response.assert_status_ok();
    assert!(response.text().contains("Page 1 of 26"));

    let list = sessions.transaction_list(&session_id).await;
    assert!(list.initialized);
    assert_eq!(list.transactions.len(), 1);
    assert_eq!(list.paginator.current_page, 1);
    assert_eq!(list.paginator.total_pages, 26);
    assert_eq!(list.paginator.page_size, TransactionListQuery::DEFAULT_PAGE_SIZE);
}

#[tokio::test]
async fn test_create_form_lists_reference_data() {
    let (state, _store) = common::create_test_state().await;
    let cookie = common::session_cookie(&state, common::CUSTOMER).await;
    let server = common::create_test_server(state);

    let response = server
        .get("/transaction/create")
        .add_header(header::COOKIE, cookie)
        .await;

    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("Cash (BYN)"));
    assert!(body.contains("Food"));
    assert!(body.contains("Grocery store"));
    assert!(body.contains("value=\"EUR\""));
    assert!(body.contains("value=\"income\""));
    assert!(body.contains("value=\"expense\""));
}

#[tokio::test]
async fn test_create_success_redirects_home() {
    let (state, store) = common::create_test_state().await;
    let account = common::first_account(&store, common::CUSTOMER).await;
    let transaction_type = common::first_transaction_type(&store, common::CUSTOMER).await;
    let cookie = common::session_cookie(&state, common::CUSTOMER).await;
    let server = common::create_test_server(state);

    let response = server
        .post("/transaction/create")
        .add_header(header::COOKIE, cookie)
        .form(&[
            ("account", account.to_string()),
            ("transaction_type", transaction_type.to_string()),
            ("kind", "expense".to_string()),
            ("amount", "7,30".to_string()),
            ("currency", "BYN".to_string()),
            ("description", "Coffee beans".to_string()),
        ])
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/");
    assert_eq!(store.transaction_count(common::CUSTOMER).await, 1);
    assert_eq!(store.transaction_count(common::OTHER_CUSTOMER).await, 0);

    let balance = store.account(account).await.unwrap().balance;
    assert_eq!(balance, Decimal::new(-730, 2));
}

#[tokio::test]
async fn test_create_negative_amount_marks_amount_field() {
    let (state, store) = common::create_test_state().await;
    let account = common::first_account(&store, common::CUSTOMER).await;
    let transaction_type = common::first_transaction_type(&store, common::CUSTOMER).await;
    let cookie = common::session_cookie(&state, common::CUSTOMER).await;
    let server = common::create_test_server(state);

    let response = server
        .post("/transaction/create")
        .add_header(header::COOKIE, cookie)
        .form(&[
            ("account", account.to_string()),
            ("transaction_type", transaction_type.to_string()),
            ("kind", "expense".to_string()),
            ("amount", "-5".to_string()),
            ("description", "Refund mistake".to_string()),
        ])
        .await;

    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("Amount must be greater than zero"));
    assert!(body.contains("value=\"-5\""));
    assert!(body.contains("Refund mistake"));
    assert_eq!(store.transaction_count(common::CUSTOMER).await, 0);
}

#[tokio::test]
async fn test_create_currency_mismatch_marks_currency_field() {
    let (state, store) = common::create_test_state().await;
    let account = common::first_account(&store, common::CUSTOMER).await;
    let transaction_type = common::first_transaction_type(&store, common::CUSTOMER).await;
    let cookie = common::session_cookie(&state, common::CUSTOMER).await;
    let server = common::create_test_server(state);

    let response = server
        .post("/transaction/create")
        .add_header(header::COOKIE, cookie)
        .form(&[
            ("account", account.to_string()),
            ("transaction_type", transaction_type.to_string()),
            ("amount", "10".to_string()),
            ("currency", "USD".to_string()),
            ("description", "Taxi".to_string()),
        ])
        .await;

    response.assert_status_ok();
    assert!(
        response
            .text()
            .contains("Currency does not match the account currency")
    );
}

#[tokio::test]
async fn test_create_unparsable_amount_reported_with_business_issues() {
    let (state, store) = common::create_test_state().await;
    let cookie = common::session_cookie(&state, common::CUSTOMER).await;
    let server = common::create_test_server(state);

    let response = server
        .post("/transaction/create")
        .add_header(header::COOKIE, cookie)
        .form(&[("amount", "twelve"), ("description", "")])
        .await;

    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("Amount must be a number"));
    assert!(body.contains("Amount is required"));
    assert!(body.contains("Description is required"));
    assert!(body.contains("value=\"twelve\""));
    assert_eq!(store.transaction_count(common::CUSTOMER).await, 0);
}

#[tokio::test]
async fn test_delete_redirects_to_list() {
    let (state, store) = common::create_test_state().await;
    let transaction_key = record(&store, common::CUSTOMER, "Cinema").await;
    let cookie = common::session_cookie(&state, common::CUSTOMER).await;
    let server = common::create_test_server(state);

    let response = server
        .get(&format!("/transaction/delete/{}", transaction_key))
        .add_header(header::COOKIE, cookie)
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/transaction/list");
    assert_eq!(store.transaction_count(common::CUSTOMER).await, 0);
}

#[tokio::test]
async fn test_delete_foreign_transaction_still_redirects() {
    let (state, store) = common::create_test_state().await;
    let transaction_key = record(&store, common::OTHER_CUSTOMER, "Not yours").await;
    let cookie = common::session_cookie(&state, common::CUSTOMER).await;
    let server = common::create_test_server(state);

    let response = server
        .get(&format!("/transaction/delete/{}", transaction_key))
        .add_header(header::COOKIE, cookie)
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/transaction/list");
    assert_eq!(store.transaction_count(common::OTHER_CUSTOMER).await, 1);
}

#[tokio::test]
async fn test_delete_unknown_transaction_redirects() {
    let (state, _store) = common::create_test_state().await;
    let cookie = common::session_cookie(&state, common::CUSTOMER).await;
    let server = common::create_test_server(state);

    let response = server
        .get("/transaction/delete/999999")
        .add_header(header::COOKIE, cookie)
        .await;

    response.assert_status(StatusCode::SEE_OTHER);
    assert_eq!(response.header("location"), "/transaction/list");
}
