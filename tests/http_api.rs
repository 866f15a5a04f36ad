//! `HttpApi` against a one-shot local HTTP responder.

use rate_explorer::api::{ApiGet, HttpApi, PATH_RATES, PATH_SCHEDULES};
use rate_explorer::error::{ApiError, TRANSPORT_ERROR_PREFIX};
use rate_explorer::models::{ApiConfig, FilterState};
use rate_explorer::query::compose_query;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Serve exactly one request with a canned response.
///
/// Returns the API base URL and a handle yielding the request line.
async fn serve_once(status_line: &str, body: &str) -> (String, JoinHandle<String>) {
    let response = format!(
        "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    serve_raw(response).await
}

/// Serve exactly one request with the given bytes, then close.
async fn serve_raw(response: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();

        let text = String::from_utf8_lossy(&request).to_string();
        text.lines().next().unwrap_or_default().to_string()
    });

    (format!("http://{addr}/api"), handle)
}

fn api_for(base_url: String) -> HttpApi {
    HttpApi::new(&ApiConfig {
        base_url,
        timeout_secs: 5,
        ..ApiConfig::default()
    })
    .unwrap()
}

#[tokio::test]
async fn ok_response_yields_parsed_body() {
    let (base, server) = serve_once("200 OK", r#"{"a": 1}"#).await;
    let api = api_for(base);

    let body = api.get("/anything", None).await.unwrap();
    assert_eq!(body, serde_json::json!({"a": 1}));
    assert_eq!(server.await.unwrap(), "GET /api/anything HTTP/1.1");
}

#[tokio::test]
async fn not_found_yields_status_text() {
    let (base, server) = serve_once("404 Not Found", "{}").await;
    let api = api_for(base);

    let err = api.get(PATH_RATES, None).await.unwrap_err();
    assert_eq!(err, ApiError::http_status(404, "Not Found"));
    assert_eq!(err.to_string(), "Not Found");
    server.await.unwrap();
}

#[tokio::test]
async fn custom_reason_phrase_is_the_error_text() {
    let (base, server) = serve_once("404 Schedule Not Available", "{}").await;
    let api = api_for(base);

    let err = api.get(PATH_RATES, None).await.unwrap_err();
    assert_eq!(err, ApiError::http_status(404, "Schedule Not Available"));
    assert_eq!(err.to_string(), "Schedule Not Available");
    server.await.unwrap();
}

#[tokio::test]
async fn error_status_with_truncated_body_is_still_status_error() {
    // Promises 512 bytes, sends 9, hangs up
    let (base, server) = serve_raw(
        "HTTP/1.1 503 Service Unavailable\r\nContent-Type: application/json\r\nContent-Length: 512\r\nConnection: close\r\n\r\n{\"error\":"
            .to_string(),
    )
    .await;
    let api = api_for(base);

    let err = api.get(PATH_RATES, None).await.unwrap_err();
    assert_eq!(err, ApiError::http_status(503, "Service Unavailable"));
    assert!(!err.is_transport());
    server.await.unwrap();
}

#[tokio::test]
async fn unparseable_body_is_malformed() {
    let (base, server) = serve_once("200 OK", "<html></html>").await;
    let api = api_for(base);

    let err = api.get(PATH_SCHEDULES, None).await.unwrap_err();
    assert!(matches!(err, ApiError::Malformed(_)));
    assert!(err.to_string().starts_with(TRANSPORT_ERROR_PREFIX));
    server.await.unwrap();
}

#[tokio::test]
async fn refused_connection_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = api_for(format!("http://{addr}/api"));
    let err = api.get_schedules().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
    assert!(err.to_string().starts_with(TRANSPORT_ERROR_PREFIX));
}

#[tokio::test]
async fn rates_request_carries_composed_query() {
    let (base, server) = serve_once(
        "200 OK",
        r#"{"count": 1, "average": 99.5, "results": [{"id": 7, "labor_category": "Engineer"}]}"#,
    )
    .await;
    let api = api_for(base);

    let state = FilterState {
        schedule: "GS-35F".to_string(),
        ..FilterState::default()
    };
    let response = api.get_rates(&compose_query(&state)).await.unwrap();
    assert_eq!(response.count, 1);
    assert_eq!(response.results[0].labor_category.as_deref(), Some("Engineer"));

    let request_line = server.await.unwrap();
    assert!(request_line.starts_with("GET /api/rates?"));
    assert!(request_line.contains("schedule=GS-35F"));
    assert!(!request_line.contains("q="));
}

#[tokio::test]
async fn schedules_end_to_end() {
    let (base, server) = serve_once(
        "200 OK",
        r#"[{"schedule": "", "sin": "", "full_name": "(all)"},
            {"schedule": "GS-35F", "sin": "132-51", "full_name": "IT Schedule 70"}]"#,
    )
    .await;
    let api = api_for(base);

    let schedules = api.get_schedules().await.unwrap();
    assert_eq!(schedules.len(), 2);
    assert!(schedules[0].is_any());
    assert_eq!(schedules[1].label(), "132-51 - IT Schedule 70");
    assert_eq!(server.await.unwrap(), "GET /api/schedules HTTP/1.1");
}
