//! Integration tests for the HTTP chat transport
//!
//! Each test serves a small router on an ephemeral local port and points
//! `HttpTransport` at it.

use axum::{
    Json, Router,
    body::Bytes,
    http::{HeaderMap, StatusCode, header},
    routing::post,
};
use folio::chat::{
    CHAT_ERROR_MESSAGE, ChatTransport, HttpTransport, build_chat_request, parse_chat_response,
};
use folio::clock::FixedClock;
use folio::config::PageConfig;
use folio::controller::{ChatOutcome, PageController};
use folio::document::{Document, ElementId, PageDocument, PageState};
use folio::storage::MemoryStore;
use folio::types::ChatMessage;
use serde_json::{Value, json};
use time::macros::datetime;
use tokio::net::TcpListener;

async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/api/chat")
}

/// Address nothing listens on.
async fn closed_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api/chat")
}

/// Answers 500 with a JSON body describing the request it received.
async fn describe_request(headers: HeaderMap, body: Bytes) -> (StatusCode, Json<Value>) {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let received: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "content_type": content_type,
            "received": received,
            "reply": "upstream is down",
        })),
    )
}

fn describing_router() -> Router {
    Router::new().route("/api/chat", post(describe_request))
}

#[tokio::test]
async fn test_request_is_json_message() {
    let transport = HttpTransport::new(serve(describing_router()).await);

    let body = transport.send(&build_chat_request("hello")).await.unwrap();
    let echoed: Value = serde_json::from_str(&body).unwrap();

    assert_eq!(echoed["content_type"], "application/json");
    assert_eq!(echoed["received"], json!({ "message": "hello" }));
}

#[tokio::test]
async fn test_error_status_with_json_body_is_a_reply() {
    let transport = HttpTransport::new(serve(describing_router()).await);

    let body = transport.send(&build_chat_request("hello")).await.unwrap();

    assert_eq!(parse_chat_response(&body).unwrap(), "upstream is down");
}

#[tokio::test]
async fn test_error_status_with_html_body_fails_to_decode() {
    let router = Router::new().route(
        "/api/chat",
        post(|| async { (StatusCode::BAD_GATEWAY, "<h1>Bad Gateway</h1>") }),
    );
    let transport = HttpTransport::new(serve(router).await);

    let body = transport.send(&build_chat_request("hello")).await.unwrap();

    assert!(parse_chat_response(&body).is_err());
}

#[tokio::test]
async fn test_connection_refused_is_an_error() {
    let transport = HttpTransport::new(closed_endpoint().await);

    assert!(transport.send(&build_chat_request("hello")).await.is_err());
}

#[tokio::test]
async fn test_unreachable_backend_shows_fixed_error() {
    let document = PageDocument::new(PageState::full());
    let controller = PageController::new(
        MemoryStore::new(),
        document.clone(),
        FixedClock::new(datetime!(2024-06-15 12:00:00 UTC)),
        HttpTransport::new(closed_endpoint().await),
        PageConfig::default(),
    );
    document.set_value(ElementId::ChatInput, "salam");

    let outcome = controller.submit_chat().await;

    assert_eq!(
        outcome,
        ChatOutcome::Failed(ChatMessage::bot(CHAT_ERROR_MESSAGE))
    );
    assert_eq!(
        document.snapshot().log,
        vec![ChatMessage::user("salam"), ChatMessage::bot(CHAT_ERROR_MESSAGE)]
    );
}

#[tokio::test]
async fn test_error_status_reply_reaches_the_log() {
    let document = PageDocument::new(PageState::full());
    let controller = PageController::new(
        MemoryStore::new(),
        document.clone(),
        FixedClock::new(datetime!(2024-06-15 12:00:00 UTC)),
        HttpTransport::new(serve(describing_router()).await),
        PageConfig::default(),
    );
    document.set_value(ElementId::ChatInput, "hello");

    let outcome = controller.submit_chat().await;

    assert_eq!(
        outcome,
        ChatOutcome::Replied(ChatMessage::bot("upstream is down"))
    );
}
