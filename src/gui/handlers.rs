//! HTTP handlers for the GUI server.

use super::types::*;
use super::AppState;
use axum::{body::Bytes, extract::rejection::BytesRejection, extract::State, Json};
use std::sync::Arc;

/// Pick the model for an outbound call: the requested one, or the default
/// when the field is absent or blank.
pub fn resolve_model(requested: Option<&str>, default: &str) -> String {
    match requested.map(str::trim) {
        Some(model) if !model.is_empty() => model.to_string(),
        _ => default.to_string(),
    }
}

pub async fn chat(
    State(state): State<Arc<AppState>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ChatReply>, ApiError> {
    // An unreadable body (timed out, aborted) is reported like undecodable JSON.
    let request: ChatRequest = body
        .ok()
        .and_then(|body| serde_json::from_slice(&body).ok())
        .ok_or_else(|| ApiError::bad_request("bad json"))?;

    let key = request.key.trim();
    if key.is_empty() {
        return Err(ApiError::bad_request("missing api key"));
    }

    let model = resolve_model(request.model.as_deref(), &state.default_model);

    match state.client.chat(key, &model, &request.messages).await {
        Ok(answer) => Ok(Json(answer.into())),
        Err(err) => {
            if let Some((citations, usage)) = err.partial() {
                tracing::debug!(
                    citations = citations.map_or(0, <[String]>::len),
                    has_usage = usage.is_some(),
                    "vendor returned no choices"
                );
            }
            tracing::warn!(%model, "chat failed: {}", err);
            Err(err.into())
        }
    }
}

/// Any method other than POST on the chat endpoint.
pub async fn post_only() -> ApiError {
    ApiError::method_not_allowed("POST only")
}
