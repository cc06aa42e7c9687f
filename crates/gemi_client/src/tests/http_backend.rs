use std::time::Duration;

use mockito::Matcher;
use serde_json::json;

use gemi_core::{EndpointKind, SessionId};

use crate::backend::{Backend, Reply};
use crate::config::BackendConfig;
use crate::error::BackendError;
use crate::http::HttpBackend;

fn backend_for(server: &mockito::ServerGuard) -> HttpBackend {
    let config = BackendConfig::new(format!("{}/api", server.url())).with_timeout(Duration::from_secs(5));
    HttpBackend::new(config).unwrap()
}

#[tokio::test]
async fn test_chat_sends_message_prompt_and_session() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/chat")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "message": "hello",
            "prompt": "hello",
            "sessionId": "session_123",
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"reply":"Hi **there**"}"#)
        .create_async()
        .await;

    let session = SessionId::parse("session_123").unwrap();
    let reply = backend_for(&server).chat("hello", Some(&session)).await.unwrap();

    assert_eq!(reply, "Hi **there**");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_chat_without_session_omits_field() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/chat")
        .match_body(Matcher::Json(json!({"message": "hi", "prompt": "hi"})))
        .with_status(200)
        .with_body(r#"{"reply":"yo"}"#)
        .create_async()
        .await;

    let reply = tokio_test::assert_ok!(backend_for(&server).chat("hi", None).await);
    assert_eq!(reply, "yo");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_server_error_surfaces_error_text() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/chat")
        .with_status(500)
        .with_body(r#"{"error":"Failed to get response from Gemini"}"#)
        .create_async()
        .await;

    let err = backend_for(&server).chat("hi", None).await.unwrap_err();
    match &err {
        BackendError::Status { status, message } => {
            assert_eq!(*status, 500);
            assert_eq!(message.as_deref(), Some("Failed to get response from Gemini"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.user_message(), "Failed to get response from Gemini");
}

#[tokio::test]
async fn test_server_error_with_html_body_uses_fallback() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/chat")
        .with_status(502)
        .with_body("<html>Bad Gateway</html>")
        .create_async()
        .await;

    let err = backend_for(&server).chat("hi", None).await.unwrap_err();
    assert!(matches!(err, BackendError::Status { status: 502, message: None }));
}

#[tokio::test]
async fn test_ok_status_with_error_field_is_remote_failure() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/chat")
        .with_status(200)
        .with_body(r#"{"error":"Message is required"}"#)
        .create_async()
        .await;

    let err = backend_for(&server).chat("hi", None).await.unwrap_err();
    assert!(matches!(err, BackendError::Remote(ref m) if m == "Message is required"));
}

#[tokio::test]
async fn test_missing_reply_field() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/chat")
        .with_status(200)
        .with_body(r#"{"answer":"wrong shape"}"#)
        .create_async()
        .await;

    let err = backend_for(&server).chat("hi", None).await.unwrap_err();
    assert!(matches!(err, BackendError::MissingField("reply")));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/chat")
        .with_status(200)
        .with_body("not json")
        .create_async()
        .await;

    let err = backend_for(&server).chat("hi", None).await.unwrap_err();
    assert!(matches!(err, BackendError::Decode(_)));
    assert_eq!(err.user_message(), "Sorry, I couldn't connect. Please try again.");
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    // Port 9 (discard) on localhost is closed on test machines.
    let config = BackendConfig::new("http://127.0.0.1:9/api").with_timeout(Duration::from_secs(2));
    let err = HttpBackend::new(config).unwrap().chat("hi", None).await.unwrap_err();
    assert!(err.is_transport());
    assert_eq!(err.user_message(), "Sorry, I couldn't connect. Please try again.");
}

#[tokio::test]
async fn test_image_reads_image_url_or_alias() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/image")
        .match_body(Matcher::Json(json!({"prompt": "a cat"})))
        .with_status(200)
        .with_body(r#"{"image":"https://img.example.com/cat.png"}"#)
        .create_async()
        .await;

    let reply = backend_for(&server).send(EndpointKind::Image, "a cat", None).await.unwrap();
    assert_eq!(reply, Reply::Media("https://img.example.com/cat.png".to_string()));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_search_posts_query() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/search")
        .match_body(Matcher::PartialJson(json!({"query": "rust async"})))
        .with_status(200)
        .with_body(r#"{"result":"Tokio is an async runtime."}"#)
        .create_async()
        .await;

    let reply = backend_for(&server).send(EndpointKind::Search, "rust async", None).await.unwrap();
    assert_eq!(reply, Reply::Text("Tokio is an async runtime.".to_string()));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_health() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/health")
        .with_status(200)
        .with_body(r#"{"status":"OK","hybrid":"Gemini + Google Search"}"#)
        .create_async()
        .await;

    let health = backend_for(&server).health().await.unwrap();
    assert!(health.is_ok());
    assert_eq!(health.hybrid.as_deref(), Some("Gemini + Google Search"));
}

#[tokio::test]
async fn test_fetch_media_relative_url() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/static/cat.png")
        .with_status(200)
        .with_body([0x89u8, b'P', b'N', b'G'])
        .create_async()
        .await;

    let bytes = backend_for(&server).fetch_media("/static/cat.png").await.unwrap();
    assert_eq!(bytes, vec![0x89, b'P', b'N', b'G']);
}

#[tokio::test]
async fn test_fetch_media_not_found() {
    let mut server = mockito::Server::new_async().await;
    server.mock("GET", "/gone.png").with_status(404).create_async().await;

    let url = format!("{}/gone.png", server.url());
    let err = backend_for(&server).fetch_media(&url).await.unwrap_err();
    assert!(matches!(err, BackendError::Status { status: 404, .. }));
}
