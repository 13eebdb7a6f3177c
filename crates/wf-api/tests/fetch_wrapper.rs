use reqwest::Method;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use wf_api::{ApiClient, ApiError, MemoryTokenStore, RequestOptions};
use wiremock::matchers::{body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Deserialize)]
struct WorkerRow {
    id: String,
    port: u16,
}

fn client(server: &MockServer, tokens: MemoryTokenStore) -> ApiClient {
    ApiClient::new(server.uri(), Arc::new(tokens))
}

fn ok_json(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_string(), "application/json")
}

#[tokio::test]
async fn test_no_token_sends_no_authorization() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/workers"))
        .and(header("content-type", "application/json"))
        .respond_with(ok_json("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server, MemoryTokenStore::new());
    let _: Value = api.json("/workers", RequestOptions::get()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_stored_token_is_sent_as_bearer() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/workers"))
        .and(header("authorization", "Bearer abc123"))
        .respond_with(ok_json("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server, MemoryTokenStore::with_tokens("abc123", "r"));
    let _: Value = api.json("workers", RequestOptions::get()).await.unwrap();
}

#[tokio::test]
async fn test_caller_header_overrides_default() {
    let server = MockServer::start().await;
    Mock::given(path("/echo"))
        .and(header("content-type", "text/plain"))
        .respond_with(ok_json("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server, MemoryTokenStore::new());
    let options = RequestOptions::get()
        .with_header("Content-Type", "text/plain")
        .unwrap();
    let _: Value = api.json("/echo", options).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let content_types: Vec<&str> = requests[0]
        .headers
        .get_all("content-type")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .collect();
    assert_eq!(content_types, vec!["text/plain"]);
}

#[tokio::test]
async fn test_error_detail_becomes_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/workers/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"detail":"not found"}"#))
        .mount(&server)
        .await;

    let api = client(&server, MemoryTokenStore::new());
    let err = api
        .json::<Value>("/workers/nope", RequestOptions::get())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "not found");
    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_unparseable_error_body_falls_back_to_status() {
    let server = MockServer::start().await;
    Mock::given(path("/workers"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let api = client(&server, MemoryTokenStore::new());
    let err = api
        .json::<Value>("/workers", RequestOptions::get())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Status { status: 500, .. }));
    assert_eq!(err.to_string(), "HTTP 500");
}

#[tokio::test]
async fn test_success_decodes_body() {
    let server = MockServer::start().await;
    Mock::given(path("/workers"))
        .respond_with(ok_json(r#"[{"id":"wk_1","port":5901}]"#))
        .mount(&server)
        .await;

    let api = client(&server, MemoryTokenStore::new());
    let rows: Vec<WorkerRow> = api.json("/workers", RequestOptions::get()).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, "wk_1");
    assert_eq!(rows[0].port, 5901);
}

#[tokio::test]
async fn test_unparseable_success_body_is_empty_object() {
    let server = MockServer::start().await;
    Mock::given(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let api = client(&server, MemoryTokenStore::new());
    let data: Map<String, Value> = api.json("/health", RequestOptions::get()).await.unwrap();
    assert!(data.is_empty());
}

#[tokio::test]
async fn test_body_and_method_are_forwarded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/workers"))
        .and(body_string(r#"{"name":"delta"}"#))
        .respond_with(ResponseTemplate::new(201).set_body_string(r#"{"id":"wk_2","port":5904}"#))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server, MemoryTokenStore::new());
    let options = RequestOptions::get()
        .with_method(Method::POST)
        .with_body(r#"{"name":"delta"}"#);
    let row: WorkerRow = api.json("/workers", options).await.unwrap();
    assert_eq!(row.id, "wk_2");
}

#[tokio::test]
async fn test_each_call_reaches_the_server() {
    let server = MockServer::start().await;
    Mock::given(path("/workers"))
        .respond_with(ok_json("[]"))
        .expect(2)
        .mount(&server)
        .await;

    let api = client(&server, MemoryTokenStore::new());
    let _: Value = api.json("/workers", RequestOptions::get()).await.unwrap();
    let _: Value = api.json("/workers", RequestOptions::get()).await.unwrap();
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    // bind then drop to get a port nobody listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = ApiClient::new(format!("http://{addr}"), Arc::new(MemoryTokenStore::new()));
    let err = api
        .json::<Value>("/workers", RequestOptions::get())
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}
