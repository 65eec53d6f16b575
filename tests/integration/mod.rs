//! HTTP-level tests for the integration API client.
//!
//! Each test runs the real reqwest transport against a local mockito server.
//! Run with: cargo test --test integration

use integration_dashboard::api::DashboardClient;
use integration_dashboard::config::Config;
use integration_dashboard::view::DashboardSnapshot;
use mockito::{Matcher, Server, ServerGuard};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn client_for(url: &str) -> DashboardClient {
    let config = Config {
        integration_api_url: url.to_string(),
        ..Config::default()
    };
    DashboardClient::from_config(&config).expect("client builds")
}

async fn json_server(method: &str, path: &str, body: &Value) -> (ServerGuard, mockito::Mock) {
    let mut server = Server::new_async().await;
    let mock = server
        .mock(method, path)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;
    (server, mock)
}

#[tokio::test]
async fn health_ok_passes_through() {
    let body = json!({"status": "ok"});
    let (server, mock) = json_server("GET", "/api/health", &body).await;

    let env = client_for(&server.url()).health().await;

    assert_eq!(Value::Object(env), body);
    mock.assert_async().await;
}

#[tokio::test]
async fn transactions_keep_server_key_order() {
    let body = r#"{"transactions":[{"z_id":1,"posting_date":"2024-03-01","amount":"15.00"}],"source":"sap_transactions_processed"}"#;
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/transactions")
        .match_query(Matcher::Any)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await;

    let env = client_for(&server.url()).transactions(None).await;

    assert_eq!(serde_json::to_string(&env).unwrap(), body);
    let row = env["transactions"][0].as_object().unwrap();
    assert_eq!(
        row.keys().collect::<Vec<_>>(),
        vec!["z_id", "posting_date", "amount"]
    );
}

#[tokio::test]
async fn environment_and_database_pass_through() {
    let mut server = Server::new_async().await;
    let environment = json!({
        "environment_variables": {"DB_PASSWORD": "SET"},
        "current_directory": "/home/site/wwwroot",
    });
    let database = json!({
        "connection_test": true,
        "tables": {"sap_transactions": {"exists": true, "row_count": 3}},
        "errors": [],
    });
    let env_mock = server
        .mock("GET", "/api/environment")
        .with_body(environment.to_string())
        .create_async()
        .await;
    let db_mock = server
        .mock("GET", "/api/database-test")
        .with_body(database.to_string())
        .create_async()
        .await;
    let client = client_for(&server.url());

    assert_eq!(Value::Object(client.environment().await), environment);
    assert_eq!(Value::Object(client.database_status().await), database);
    env_mock.assert_async().await;
    db_mock.assert_async().await;
}

#[tokio::test]
async fn transactions_sends_default_limit() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/transactions-raw")
        .match_query(Matcher::UrlEncoded("limit".into(), "100".into()))
        .with_body(r#"{"transactions":[{"id":"1"}],"count":1}"#)
        .create_async()
        .await;

    let env = client_for(&server.url()).transactions(None).await;

    assert_eq!(env["transactions"], json!([{"id": "1"}]));
    mock.assert_async().await;
}

#[tokio::test]
async fn transactions_sends_explicit_limit() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/transactions-raw")
        .match_query(Matcher::UrlEncoded("limit".into(), "25".into()))
        .with_body(r#"{"transactions":[]}"#)
        .create_async()
        .await;

    client_for(&server.url()).transactions(Some(25)).await;

    mock.assert_async().await;
}

#[tokio::test]
async fn trigger_processing_posts_with_json_content_type() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/process")
        .match_header("content-type", "application/json")
        .match_header("authorization", Matcher::Missing)
        .match_body("")
        .with_body(r#"{"status":"success","processing_time_seconds":1.5}"#)
        .create_async()
        .await;

    let env = client_for(&server.url()).trigger_processing().await;

    assert_eq!(env["status"], json!("success"));
    mock.assert_async().await;
}

#[tokio::test]
async fn server_error_status_uses_fallback_even_with_json_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/health")
        .with_status(500)
        .with_body(r#"{"status":"error","message":"db down","timestamp":"now"}"#)
        .create_async()
        .await;

    let env = client_for(&server.url()).health().await;

    assert_eq!(
        Value::Object(env),
        json!({"status": "error", "message": "HTTP 500 from /api/health"})
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn invalid_json_uses_fallback() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/database-test")
        .with_body("<html>Application Error</html>")
        .create_async()
        .await;

    let env = client_for(&server.url()).database_status().await;

    assert_eq!(env.len(), 2);
    assert_eq!(env["connection_test"], json!(false));
    assert!(env["error"]
        .as_str()
        .unwrap()
        .starts_with("invalid response body"));
}

#[tokio::test]
async fn non_object_json_uses_fallback() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/transactions-raw")
        .match_query(Matcher::Any)
        .with_body(r#"[{"id":"1"}]"#)
        .create_async()
        .await;

    let env = client_for(&server.url()).transactions(None).await;

    assert_eq!(
        Value::Object(env),
        json!({
            "transactions": [],
            "error": "invalid response body: expected a JSON object, got an array",
        })
    );
}

#[tokio::test]
async fn unreachable_service_falls_back_everywhere() {
    let client = client_for("http://127.0.0.1:1");

    let health = client.health().await;
    assert_eq!(health.len(), 2);
    assert_eq!(health["status"], json!("error"));
    assert!(health["message"].is_string());

    let transactions = client.transactions(None).await;
    assert_eq!(transactions["transactions"], json!([]));
    assert!(transactions["error"].is_string());

    let database = client.database_status().await;
    assert_eq!(database.len(), 2);
    assert_eq!(database["connection_test"], json!(false));
    assert!(database["error"].is_string());

    let process = client.trigger_processing().await;
    assert_eq!(process["status"], json!("error"));

    let environment = client.environment().await;
    assert_eq!(environment.keys().collect::<Vec<_>>(), vec!["error"]);
}

#[tokio::test]
async fn dashboard_snapshot_over_http() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/health")
        .with_body(r#"{"status":"healthy","data":{"total_transactions":12}}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/api/database-test")
        .with_status(503)
        .create_async()
        .await;
    server
        .mock("GET", "/api/transactions-raw")
        .match_query(Matcher::UrlEncoded("limit".into(), "5".into()))
        .with_body(r#"{"transactions":[{"amount":"10.00"}],"source":"sap_transactions"}"#)
        .create_async()
        .await;

    let client = client_for(&format!("{}/", server.url()));
    let snapshot = DashboardSnapshot::load(&client, Some(5)).await;

    assert_eq!(snapshot.health_summary().total_transactions, Some(12));
    assert_eq!(snapshot.database_summary().connected, Some(false));
    assert_eq!(snapshot.transactions_summary().rows.len(), 1);

    let text = snapshot.to_string();
    assert!(text.contains("Error: HTTP 503 from /api/database-test"));
    assert!(text.contains("sap_transactions"));
}
