//! LINE Messaging API push client
//!
//! Delivers the human-readable order summary to the single configured staff
//! recipient. Callers treat delivery as best-effort; failures here must never
//! reach the HTTP response.

use async_trait::async_trait;
use serde_json::json;

const PUSH_ENDPOINT: &str = "https://api.line.me/v2/bot/message/push";

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Push API rejected message (HTTP {status}): {body}")]
    Api { status: u16, body: String },
}

/// Messaging collaborator seam — swapped for a recording double in tests.
#[async_trait]
pub trait OrderNotifier: Send + Sync {
    async fn push_text(&self, text: &str) -> Result<(), NotifyError>;
}

/// LINE Messaging API implementation
pub struct LineNotifier {
    client: reqwest::Client,
    access_token: String,
    recipient_id: String,
}

impl LineNotifier {
    pub fn new(access_token: String, recipient_id: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            access_token,
            recipient_id,
        }
    }
}

#[async_trait]
impl OrderNotifier for LineNotifier {
    async fn push_text(&self, text: &str) -> Result<(), NotifyError> {
        let body = json!({
            "to": self.recipient_id,
            "messages": [{ "type": "text", "text": text }],
        });

        let resp = self
            .client
            .post(PUSH_ENDPOINT)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| NotifyError::Http(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(NotifyError::Api {
                status: status.as_u16(),
                body,
            });
        }

        tracing::info!(recipient = %self.recipient_id, "LINE 消息已发送");
        Ok(())
    }
}
