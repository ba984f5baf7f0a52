//! The chat HTTP surface.
//!
//! Endpoints:
//! - `GET  /`        — static chat page
//! - `GET  /static/*` — chat page assets
//! - `POST /ask`     — `{"message": string}` in, `{"reply": string}` out
//!
//! Only structurally malformed requests produce a non-200 status: a
//! non-JSON body and a missing/empty `message` field each map to a fixed
//! 400 reply. Everything downstream of validation answers with 200.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::Html;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::services::ServeDir;
use tracing::{info, warn};
use uuid::Uuid;

use techadvisor_agent::AdvisorService;

pub const INVALID_FORMAT_REPLY: &str = "Invalid request format.";
pub const INVALID_QUERY_REPLY: &str = "Please provide a valid query.";

#[derive(Clone)]
pub struct ChatState {
    advisor: Arc<AdvisorService>,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub reply: String,
}

pub fn router(advisor: Arc<AdvisorService>) -> Router {
    Router::new()
        .route("/", get(chat_page))
        .route("/ask", post(ask))
        .nest_service("/static", ServeDir::new("static"))
        .with_state(ChatState { advisor })
}

async fn chat_page() -> Html<&'static str> {
    Html(include_str!("../../../templates/chat.html"))
}

async fn ask(
    State(state): State<ChatState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<AskResponse>) {
    let correlation_id = Uuid::new_v4().simple().to_string();

    if !has_json_content_type(&headers) {
        warn!(
            event_name = "ask.invalid_format",
            correlation_id = %correlation_id,
            "request body is not json"
        );
        return reply_with(StatusCode::BAD_REQUEST, INVALID_FORMAT_REPLY);
    }

    let payload: serde_json::Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(_) => {
            warn!(
                event_name = "ask.invalid_format",
                correlation_id = %correlation_id,
                "request body is not json"
            );
            return reply_with(StatusCode::BAD_REQUEST, INVALID_FORMAT_REPLY);
        }
    };

    let message = match payload.get("message").and_then(|value| value.as_str()) {
        Some(message) if !message.is_empty() => message.to_string(),
        _ => {
            warn!(
                event_name = "ask.invalid_query",
                correlation_id = %correlation_id,
                "missing or empty message field"
            );
            return reply_with(StatusCode::BAD_REQUEST, INVALID_QUERY_REPLY);
        }
    };

    info!(
        event_name = "ask.received",
        correlation_id = %correlation_id,
        query = %message,
        "received query"
    );

    let reply = state.advisor.answer(&message).await;
    (StatusCode::OK, Json(AskResponse { reply }))
}

fn reply_with(status: StatusCode, reply: &str) -> (StatusCode, Json<AskResponse>) {
    (status, Json(AskResponse { reply: reply.to_string() }))
}

/// Mirrors the usual "is json" mimetype check: `application/json` or any
/// `+json` suffix, parameters ignored.
fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(header::CONTENT_TYPE).and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let mime = content_type.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
    mime == "application/json" || mime.ends_with("+json")
}
