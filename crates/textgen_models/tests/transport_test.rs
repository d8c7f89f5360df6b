//! Tests for the reqwest transport against a local mock server.

use mockito::{Matcher, Server};
use serde_json::json;
use std::time::Duration;
use textgen_core::ProviderId;
use textgen_error::{RetryableError, TransportErrorKind};
use textgen_models::{HttpTransport, Transport, TransportRequest};

fn transport() -> HttpTransport {
    HttpTransport::new(ProviderId::Cohere, Duration::from_secs(5)).expect("Client builds")
}

fn request(server: &Server) -> TransportRequest {
    TransportRequest::new(
        format!("{}/v1/generate", server.url()),
        json!({"model": "command", "prompt": "Hi"}),
    )
    .header("Authorization", "Bearer test-key")
}

#[tokio::test]
async fn test_success_returns_json_and_forwards_headers() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/generate")
        .match_header("authorization", "Bearer test-key")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({"model": "command", "prompt": "Hi"})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"generations": [{"id": "a", "text": "Hello"}]}"#)
        .create_async()
        .await;

    let body = transport()
        .send(request(&server))
        .await
        .expect("Request succeeds");

    assert_eq!(body["generations"][0]["text"], "Hello");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_429_is_rate_limited() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/v1/generate")
        .with_status(429)
        .with_body("too many requests")
        .create_async()
        .await;

    let err = transport().send(request(&server)).await.unwrap_err();

    assert_eq!(
        err.kind(),
        &TransportErrorKind::RateLimited("too many requests".to_string())
    );
    assert_eq!(err.provider, "cohere");
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_server_error_keeps_status_and_body() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/v1/generate")
        .with_status(500)
        .with_body("internal error")
        .create_async()
        .await;

    let err = transport().send(request(&server)).await.unwrap_err();

    assert_eq!(
        err.kind(),
        &TransportErrorKind::Api {
            status: 500,
            message: "internal error".to_string()
        }
    );
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_client_error_is_not_retryable() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/v1/generate")
        .with_status(401)
        .with_body(r#"{"message": "invalid api token"}"#)
        .create_async()
        .await;

    let err = transport().send(request(&server)).await.unwrap_err();

    assert!(matches!(
        err.kind(),
        TransportErrorKind::Api { status: 401, message } if message.contains("invalid api token")
    ));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_non_json_body_is_a_parse_error() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/v1/generate")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let err = transport().send(request(&server)).await.unwrap_err();

    assert!(matches!(err.kind(), TransportErrorKind::Parse(_)));
}

#[tokio::test]
async fn test_invalid_url_is_an_http_error() {
    let err = transport()
        .send(TransportRequest::new("not a url", json!({})))
        .await
        .unwrap_err();

    assert!(matches!(err.kind(), TransportErrorKind::Http(_)));
}
