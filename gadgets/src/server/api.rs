//! Chat endpoints.
//!
//! - `POST /chat/simple` answers one message as JSON.
//! - `POST /chat` streams `data: ...` frames as `text/plain`.

use std::convert::Infallible;
use std::sync::Arc;

use async_stream::stream;
use axum::body::Body;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use futures_util::StreamExt;
use gchat::{ChatError, ChatService, encode_frames};
use gprovider::{Message, Role};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

const STREAM_CONTENT_TYPE: &str = "text/plain; charset=utf-8";
const PROBLEM_CONTENT_TYPE: &str = "application/problem+json";
const PROBLEM_TYPE: &str = "https://tools.ietf.org/html/rfc9110#section-15.6.1";
const PROBLEM_TITLE: &str = "An error occurred while processing your request.";

#[derive(Debug, Deserialize)]
pub struct SimpleChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct SimpleChatResponse {
    pub response: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatRequest {
    /// History with unrecognized roles dropped.
    pub fn into_history(self) -> Vec<Message> {
        self.messages
            .into_iter()
            .filter_map(|message| {
                Role::parse(&message.role).map(|role| Message::new(role, message.content))
            })
            .collect()
    }
}

/// Problem-details body returned when a simple chat fails.
#[derive(Debug, Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub title: &'static str,
    pub status: u16,
    pub detail: String,
}

#[derive(Debug)]
pub struct ApiError(ChatError);

impl From<ChatError> for ApiError {
    fn from(value: ChatError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let problem = ProblemDetails {
            kind: PROBLEM_TYPE,
            title: PROBLEM_TITLE,
            status: status.as_u16(),
            detail: self.0.message,
        };

        (
            status,
            [(header::CONTENT_TYPE, PROBLEM_CONTENT_TYPE)],
            Json(problem),
        )
            .into_response()
    }
}

pub fn chat_router(service: Arc<ChatService>) -> Router {
    Router::new()
        .route("/chat", post(stream_chat))
        .route("/chat/simple", post(simple_chat))
        .with_state(service)
}

/// POST /chat/simple
pub async fn simple_chat(
    State(service): State<Arc<ChatService>>,
    Json(request): Json<SimpleChatRequest>,
) -> Result<Json<SimpleChatResponse>, ApiError> {
    let response = service.simple_chat(request.message).await?;
    Ok(Json(SimpleChatResponse { response }))
}

/// POST /chat
///
/// The body is produced lazily. When the client goes away the body is
/// dropped, which cancels the token and stops the backend stream.
pub async fn stream_chat(
    State(service): State<Arc<ChatService>>,
    Json(request): Json<ChatRequest>,
) -> Response {
    let history = request.into_history();
    let cancel = CancellationToken::new();
    let guard = cancel.clone().drop_guard();

    let body = stream! {
        let _guard = guard;
        let mut frames = encode_frames(service.stream_chat(history, cancel));
        while let Some(frame) = frames.next().await {
            yield Ok::<_, Infallible>(frame);
        }
    };

    (
        [(header::CONTENT_TYPE, STREAM_CONTENT_TYPE)],
        Body::from_stream(body),
    )
        .into_response()
}
