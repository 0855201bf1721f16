//! Perplexity chat-completions client.
//!
//! One call per request, no retries. The body is always read in full before
//! the status is inspected so upstream error bodies reach the caller intact.

#[cfg(test)]
mod tests;
mod types;

pub use types::*;

use crate::config::{ApiConfig, DEFAULT_ENDPOINT};
use crate::error::PplxError;
use crate::http::{auth_headers, create_client_with_timeout};
use reqwest::Client;
use std::time::Duration;

/// Async client used by the GUI server.
#[derive(Clone)]
pub struct PerplexityClient {
    http: Client,
    endpoint: String,
}

impl PerplexityClient {
    pub fn new(http: Client) -> Self {
        Self {
            http,
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Build a client from the `[api]` config section.
    pub fn from_config(api: &ApiConfig) -> Result<Self, PplxError> {
        let http = create_client_with_timeout(Duration::from_secs(api.timeout_secs))?;
        Ok(Self::new(http).with_endpoint(&api.endpoint))
    }

    /// Override the chat-completions URL (used in tests).
    pub fn with_endpoint(mut self, url: &str) -> Self {
        self.endpoint = url.to_string();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one chat exchange and return the first choice.
    pub async fn chat(
        &self,
        key: &str,
        model: &str,
        messages: &[Message],
    ) -> Result<ChatAnswer, PplxError> {
        let headers = auth_headers(key)?;
        tracing::debug!(model, messages = messages.len(), "calling vendor");

        let response = self
            .http
            .post(&self.endpoint)
            .headers(headers)
            .json(&VendorRequest::new(model, messages))
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::debug!(status, bytes = body.len(), "vendor responded");

        parse_response(status, &body)
    }
}

/// Blocking one-shot POST. Returns the raw body on 200 without decoding it.
pub fn post_blocking(
    http: &reqwest::blocking::Client,
    endpoint: &str,
    key: &str,
    model: &str,
    messages: &[Message],
) -> Result<String, PplxError> {
    let body = serde_json::to_vec(&VendorRequest::new(model, messages))
        .map_err(|e| PplxError::Request(format!("encode request: {}", e)))?;

    let response = http
        .post(endpoint)
        .headers(auth_headers(key)?)
        .body(body)
        .send()?;

    let status = response.status().as_u16();
    let body = response.text()?;
    if status != 200 {
        return Err(PplxError::Api { status, body });
    }
    Ok(body)
}

/// Turn a status and raw body into an answer, or the matching error.
pub fn parse_response(status: u16, body: &str) -> Result<ChatAnswer, PplxError> {
    if status != 200 {
        return Err(PplxError::Api {
            status,
            body: body.to_string(),
        });
    }

    let parsed: VendorResponse =
        serde_json::from_str(body).map_err(|e| PplxError::BadJson(e.to_string()))?;

    let VendorResponse {
        choices,
        citations,
        usage,
    } = parsed;

    match choices.into_iter().next() {
        Some(first) => Ok(ChatAnswer {
            answer: first.message.content,
            citations,
            usage,
        }),
        None => Err(PplxError::EmptyResponse { citations, usage }),
    }
}
