//! Shared HTTP plumbing for the OpenAI-compatible clients

use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::LlmError;

/// Used when a 429 carries no usable retry-after header
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Build the reqwest client with the configured request timeout
pub(super) fn build_http(timeout: Duration) -> Result<Client, LlmError> {
    Client::builder().timeout(timeout).build().map_err(LlmError::Network)
}

/// POST a JSON body with bearer auth and decode the JSON reply
///
/// Single attempt: rate limits and API errors are mapped and returned as-is.
pub(super) async fn post_json<T: DeserializeOwned>(
    http: &Client,
    url: &str,
    api_key: &str,
    body: &serde_json::Value,
) -> Result<T, LlmError> {
    debug!(%url, "post_json: called");
    let response = http
        .post(url)
        .bearer_auth(api_key)
        .header("content-type", "application/json")
        .json(body)
        .send()
        .await?;

    let status = response.status().as_u16();

    if status == 429 {
        debug!("post_json: rate limited (429)");
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_RETRY_AFTER_SECS);

        return Err(LlmError::RateLimited {
            retry_after: Duration::from_secs(retry_after),
        });
    }

    if !response.status().is_success() {
        debug!(%status, "post_json: API error");
        let text = response.text().await.unwrap_or_default();
        return Err(LlmError::ApiError {
            status,
            message: error_message(&text),
        });
    }

    let text = response.text().await?;
    debug!(body_len = text.len(), "post_json: success");
    serde_json::from_str(&text).map_err(|e| LlmError::InvalidResponse(format!("{}: {}", e, truncate(&text, 200))))
}

/// Pull `error.message` out of an OpenAI error body, else return the body
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_openai_body() {
        let body = r#"{"error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}}"#;
        assert_eq!(error_message(body), "Incorrect API key provided");
    }

    #[test]
    fn test_error_message_falls_back_to_raw_body() {
        assert_eq!(error_message("  upstream timeout \n"), "upstream timeout");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("abcdef", 3), "abc...");
        assert_eq!(truncate("abc", 3), "abc");
        assert_eq!(truncate("héllo", 2), "hé...");
    }
}
