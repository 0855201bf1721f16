//! Shared HTTP client factory.
//!
//! Keeps timeouts and client construction in one place for both binaries.

use crate::error::PplxError;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use std::time::Duration;

/// Overall timeout for a vendor call (60 seconds).
pub const VENDOR_TIMEOUT: Duration = Duration::from_secs(60);

/// Time the GUI server allows for reading a request body (10 seconds).
pub const SERVER_READ_TIMEOUT: Duration = Duration::from_secs(10);

/// Time the GUI server allows for handling a whole request (60 seconds).
pub const SERVER_WRITE_TIMEOUT: Duration = Duration::from_secs(60);

/// Vendor-specific credential header, sent next to `Authorization`.
pub const SUBSCRIPTION_TOKEN: &str = "x-subscription-token";

/// Create a new HTTP client with the vendor timeout.
pub fn create_client() -> Result<Client, PplxError> {
    create_client_with_timeout(VENDOR_TIMEOUT)
}

/// Create a new HTTP client with a custom timeout.
pub fn create_client_with_timeout(timeout: Duration) -> Result<Client, PplxError> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// Create a blocking HTTP client with the library's default settings.
pub fn create_blocking_client() -> Result<reqwest::blocking::Client, PplxError> {
    Ok(reqwest::blocking::Client::builder().build()?)
}

/// Headers for an authenticated JSON call. The vendor accepts either auth
/// header, so both carry the key.
pub fn auth_headers(key: &str) -> Result<HeaderMap, PplxError> {
    let invalid = |_| PplxError::Request("invalid api key header".to_string());

    let mut bearer = HeaderValue::from_str(&format!("Bearer {}", key)).map_err(invalid)?;
    bearer.set_sensitive(true);
    let mut token = HeaderValue::from_str(key).map_err(invalid)?;
    token.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, bearer);
    headers.insert(SUBSCRIPTION_TOKEN, token);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}
