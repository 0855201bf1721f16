//! Request and response types for the GUI endpoint.

use crate::error::PplxError;
use crate::perplexity::{null_as_default, ChatAnswer, Message};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/chat`. Every field may be absent or null.
#[derive(Deserialize)]
pub struct ChatRequest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub answer: String,
    pub citations: Option<Vec<String>>,
    pub usage: Option<Value>,
}

impl From<ChatAnswer> for ChatReply {
    fn from(answer: ChatAnswer) -> Self {
        Self {
            answer: answer.answer,
            citations: answer.citations,
            usage: answer.usage,
        }
    }
}

/// Plain-text error response with a status code.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    /// Create a 400 Bad Request error.
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    /// Create a 405 Method Not Allowed error.
    pub fn method_not_allowed(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::METHOD_NOT_ALLOWED,
            message: msg.into(),
        }
    }
}

impl From<PplxError> for ApiError {
    fn from(err: PplxError) -> Self {
        Self {
            status: err.status_code(),
            message: err.to_string(),
        }
    }
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
