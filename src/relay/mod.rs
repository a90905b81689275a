//! Chat relay
//!
//! The HTTP backend the portfolio page posts chat messages to.
//!
//! # Endpoints
//!
//! - `POST /api/chat` - `{"message": "..."}` in, `{"reply": "..."}` out; a
//!   body that is not a JSON object is a `400`
//! - `OPTIONS /api/chat` - browser preflight, `204 No Content`
//!
//! Every response carries CORS headers for the page's origin.

pub mod backend;
pub mod error;

pub use backend::{EchoBackend, GeminiBackend, ReplyBackend};
pub use error::RelayError;

use crate::chat::ChatReply;
use crate::config::RelayConfig;
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderValue, StatusCode, header},
    routing::post,
};
use serde_json::Value;
use std::sync::Arc;
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

pub const ALLOWED_HEADERS: &str = "Content-Type, X-Requested-With";
pub const ALLOWED_METHODS: &str = "POST, OPTIONS";

#[derive(Clone)]
pub struct RelayState {
    backend: Arc<dyn ReplyBackend>,
}

impl RelayState {
    pub fn new(backend: Arc<dyn ReplyBackend>) -> Self {
        Self { backend }
    }

    /// Gemini when an API key is configured, echo otherwise.
    pub fn from_config(config: &RelayConfig) -> Self {
        let backend: Arc<dyn ReplyBackend> = match &config.gemini_api_key {
            Some(key) => Arc::new(GeminiBackend::new(key.clone(), config.upstream_timeout)),
            None => Arc::new(EchoBackend),
        };
        Self::new(backend)
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }
}

/// Build the relay router with CORS headers for `allowed_origin`.
pub fn build_router(state: RelayState, allowed_origin: &str) -> Result<Router, RelayError> {
    let origin = HeaderValue::from_str(allowed_origin)
        .map_err(|e| RelayError::Config(format!("allowed origin {allowed_origin}: {e}")))?;

    Ok(Router::new()
        .route("/api/chat", post(chat).options(preflight))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            origin,
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(ALLOWED_HEADERS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// The body is read as JSON whatever its declared content type.
async fn chat(
    State(state): State<RelayState>,
    body: Bytes,
) -> Result<Json<ChatReply>, RelayError> {
    let body: Value =
        serde_json::from_slice(&body).map_err(|e| RelayError::BadRequest(e.to_string()))?;
    let message = incoming_message(&body)?;

    tracing::debug!(
        backend = state.backend.name(),
        chars = message.chars().count(),
        "chat request"
    );
    let reply = state.backend.reply(&message).await;
    Ok(Json(ChatReply { reply }))
}

/// Missing or `null` reads as empty; other non-string values become their JSON text.
fn incoming_message(body: &Value) -> Result<String, RelayError> {
    let Value::Object(fields) = body else {
        return Err(RelayError::BadRequest(
            "expected a JSON object".to_string(),
        ));
    };
    Ok(match fields.get("message") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    })
}

async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// Start the relay and serve until Ctrl+C or SIGTERM.
pub async fn serve(config: RelayConfig) -> anyhow::Result<()> {
    let state = RelayState::from_config(&config);
    tracing::info!(backend = state.backend_name(), "reply backend selected");

    let router = build_router(state, &config.allowed_origin)?;
    let listener = tokio::net::TcpListener::bind(config.addr).await?;

    tracing::info!("chat relay listening on {}", config.addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("chat relay shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
