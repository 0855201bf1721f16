//! Unified error handling for pplx-chat.
//!
//! Every failure is eventually flattened to a plain string: printed by the CLI
//! or returned as an HTTP error body by the GUI.

use axum::http::StatusCode;
use serde_json::Value;
use thiserror::Error;

/// Unified error type for pplx-chat operations.
#[derive(Debug, Clone, Error)]
pub enum PplxError {
    /// No credential supplied.
    #[error("missing api key")]
    MissingApiKey,
    /// Connection failure, timeout, or a request that could not be built.
    #[error("request failed: {0}")]
    Request(String),
    /// Upstream answered with a non-200 status.
    #[error("api error {status}: {body}")]
    Api { status: u16, body: String },
    /// Upstream body was not a chat completion.
    #[error("bad api json: {0}")]
    BadJson(String),
    /// Well-formed completion with zero choices.
    #[error("empty response")]
    EmptyResponse {
        citations: Option<Vec<String>>,
        usage: Option<Value>,
    },
    /// Config file could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl PplxError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingApiKey => StatusCode::BAD_REQUEST,
            Self::Request(_) | Self::Api { .. } | Self::BadJson(_) | Self::EmptyResponse { .. } => {
                StatusCode::BAD_GATEWAY
            }
            Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Citations and usage that arrived alongside a failed answer extraction.
    pub fn partial(&self) -> Option<(Option<&[String]>, Option<&Value>)> {
        match self {
            Self::EmptyResponse { citations, usage } => {
                Some((citations.as_deref(), usage.as_ref()))
            }
            _ => None,
        }
    }
}

impl From<reqwest::Error> for PplxError {
    fn from(err: reqwest::Error) -> Self {
        Self::Request(err.to_string())
    }
}
