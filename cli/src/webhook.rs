//! Outbound webhook client.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Request timeout for webhook calls.
pub const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(30);

/// Outcome of one webhook call. Transport failures are reported here, not raised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookResult {
    /// Whether the server answered with a status below 300
    pub success: bool,
    /// HTTP status, or 0 when no response was received
    pub status_code: u16,
    /// Response body, or the error text
    pub response: String,
    /// UTC time the call completed
    pub timestamp: String,
}

impl WebhookResult {
    fn from_status(status_code: u16, response: String) -> Self {
        Self {
            success: status_code < 300,
            status_code,
            response,
            timestamp: timestamp(),
        }
    }

    fn failure(error: impl ToString) -> Self {
        Self {
            success: false,
            status_code: 0,
            response: error.to_string(),
            timestamp: timestamp(),
        }
    }
}

/// Text prompt sent to a webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptPayload {
    /// Prompt title
    pub title: String,
    /// Payload kind, always "text"
    #[serde(rename = "type")]
    pub kind: String,
    /// Prompt body
    pub text: String,
    /// Webhook category the prompt belongs to
    pub category: String,
    /// UTC creation time
    pub timestamp: String,
}

impl PromptPayload {
    /// Build a text prompt stamped with the current time.
    pub fn new(title: impl Into<String>, text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kind: "text".to_string(),
            text: text.into(),
            category: category.into(),
            timestamp: timestamp(),
        }
    }

    /// Default title for a category's prompt.
    pub fn default_title(category: &str) -> String {
        format!("{} - Custom Prompt", category)
    }
}

/// Current UTC time as an ISO-8601 string without offset.
pub fn timestamp() -> String {
    chrono::Utc::now()
        .naive_utc()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

/// POST `payload` as JSON to `url`.
pub async fn send<T: Serialize + ?Sized>(url: &str, payload: &T) -> WebhookResult {
    let client = match reqwest::Client::builder().timeout(WEBHOOK_TIMEOUT).build() {
        Ok(client) => client,
        Err(e) => return WebhookResult::failure(e),
    };

    match client.post(url).json(payload).send().await {
        Ok(response) => {
            let status = response.status().as_u16();
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    log::warn!("Failed to read webhook response body: {}", e);
                    String::new()
                }
            };
            log::debug!("Webhook {} answered {}", url, status);
            WebhookResult::from_status(status, body)
        }
        Err(e) => {
            log::warn!("Webhook {} failed: {}", url, e);
            WebhookResult::failure(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_payload_shape() {
        let payload = PromptPayload::new("Code Generator - Custom Prompt", "make a card", "Code Generator");
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["type"], "text");
        assert_eq!(value["text"], "make a card");
        assert_eq!(value["category"], "Code Generator");
        assert!(value["timestamp"].as_str().unwrap().contains('T'));
        assert!(value.get("kind").is_none());
    }

    #[test]
    fn test_default_title() {
        assert_eq!(PromptPayload::default_title("Designer"), "Designer - Custom Prompt");
    }

    #[test]
    fn test_status_classification() {
        assert!(WebhookResult::from_status(200, "ok".into()).success);
        assert!(WebhookResult::from_status(204, String::new()).success);
        assert!(!WebhookResult::from_status(302, String::new()).success);
        assert!(!WebhookResult::from_status(500, "boom".into()).success);
    }

    #[tokio::test]
    async fn test_transport_failure_reported() {
        let payload = PromptPayload::new("t", "x", "c");
        let result = send("not a url", &payload).await;
        assert!(!result.success);
        assert_eq!(result.status_code, 0);
        assert!(!result.response.is_empty());
    }

    #[test]
    fn test_timestamp_format() {
        let ts = timestamp();
        assert_eq!(ts.len(), 26);
        assert_eq!(&ts[10..11], "T");
    }
}
