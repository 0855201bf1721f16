//! One-shot command-line exchange.
//!
//! Sends a fixed system + user conversation and hands back the raw response
//! body. Nothing in the chat payload is parsed.

use crate::error::PplxError;
use crate::http::create_blocking_client;
use crate::perplexity::{post_blocking, Message};

/// Environment variable holding the CLI credential.
pub const API_KEY_VAR: &str = "PPLX_API_KEY";

/// Model for the one-shot exchange. Differs from `config::DEFAULT_GUI_MODEL`.
pub const CLI_MODEL: &str = "sonar";

pub const SYSTEM_PROMPT: &str = "Be precise and concise.";
pub const USER_PROMPT: &str = "How many stars are there in our galaxy?";

const CHECKLIST: &str = "\
Possible causes:
  - the key is malformed (Perplexity keys start with \"pplx-\")
  - the account has no API credits left
  - the subscription tier does not include API access";

/// The fixed conversation sent by the CLI.
pub fn exchange() -> Vec<Message> {
    vec![Message::system(SYSTEM_PROMPT), Message::user(USER_PROMPT)]
}

/// Read the credential from `PPLX_API_KEY`. Unset and blank are both missing.
pub fn api_key_from_env() -> Result<String, PplxError> {
    key_from(std::env::var(API_KEY_VAR).ok())
}

fn key_from(value: Option<String>) -> Result<String, PplxError> {
    match value {
        Some(key) if !key.trim().is_empty() => Ok(key.trim().to_string()),
        _ => Err(PplxError::MissingApiKey),
    }
}

/// Send the fixed exchange and return the raw body of a 200 response.
pub fn run(endpoint: &str, key: &str) -> Result<String, PplxError> {
    let http = create_blocking_client()?;
    tracing::debug!(endpoint, model = CLI_MODEL, "sending one-shot exchange");
    post_blocking(&http, endpoint, key, CLI_MODEL, &exchange())
}

/// Terminal text for a failed run.
pub fn describe_failure(err: &PplxError) -> String {
    match err {
        PplxError::MissingApiKey => format!("{} is not set", API_KEY_VAR),
        PplxError::Api { status, body } => {
            format!("API returned status {}\n{}\n\n{}", status, body, CHECKLIST)
        }
        other => other.to_string(),
    }
}
