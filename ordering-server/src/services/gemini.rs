//! Gemini generateContent client
//!
//! 生成式 AI 协作方，用于加购推荐。对瞬时过载（HTTP 429/503）做指数退避
//! 重试，重试额度耗尽时降级为固定的保底推荐文案，绝不让推荐功能把下单
//! 流程搞挂。

use async_trait::async_trait;
use serde_json::json;
use std::time::Duration;

use crate::utils::retry::{RetryOutcome, retry_with_backoff};

const DEFAULT_MODEL: &str = "gemini-1.5-flash";
const RETRY_ATTEMPTS: u32 = 3;
const RETRY_BASE_DELAY: Duration = Duration::from_secs(1);

/// Canned recommendation substituted when the retry budget is exhausted
pub const FALLBACK_RECOMMENDATION: &str =
    "今天店裡的招牌品項都很受歡迎，搭配一杯飲品會更滿足喔！";

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    /// Transient overload signal (HTTP 429/503) — worth retrying
    #[error("Generative API overloaded (HTTP {0})")]
    Overloaded(u16),

    /// Hard fault from the API (bad key, malformed request, …)
    #[error("Generative API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Unexpected response shape: {0}")]
    BadResponse(String),
}

impl GenerationError {
    pub fn is_transient(&self) -> bool {
        matches!(self, GenerationError::Overloaded(_))
    }
}

/// Generation collaborator seam — swapped for scripted doubles in tests.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Gemini implementation
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let url = format!(
            "https://generativelanguage.googleapis.com/v1beta/models/{}:generateContent?key={}",
            self.model, self.api_key
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Http(e.to_string()))?;

        let status = resp.status().as_u16();
        if status == 429 || status == 503 {
            return Err(GenerationError::Overloaded(status));
        }
        if !(200..300).contains(&status) {
            let body = resp.text().await.unwrap_or_default();
            return Err(GenerationError::Api { status, body });
        }

        let payload: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| GenerationError::BadResponse(e.to_string()))?;
        payload["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(|s| s.trim().to_string())
            .ok_or_else(|| GenerationError::BadResponse("missing candidates[0].text".into()))
    }
}

/// Generate a recommendation with bounded exponential-backoff retry.
///
/// Transient overload is retried up to three attempts with doubling delays;
/// exhausting the budget degrades to [`FALLBACK_RECOMMENDATION`] instead of
/// failing. Any other error class fails immediately.
pub async fn generate_with_retry(
    generator: &dyn TextGenerator,
    prompt: &str,
) -> Result<String, GenerationError> {
    let outcome = retry_with_backoff(
        RETRY_ATTEMPTS,
        RETRY_BASE_DELAY,
        GenerationError::is_transient,
        || generator.generate(prompt),
    )
    .await?;

    match outcome {
        RetryOutcome::Success(text) => Ok(text),
        RetryOutcome::Exhausted => {
            tracing::warn!("推荐生成重试耗尽，改用保底文案");
            Ok(FALLBACK_RECOMMENDATION.to_string())
        }
    }
}

/// Build the upsell prompt from the customer's cart and the current menu.
pub fn build_prompt(language: &str, cart_items: &[String], available_items: &[String]) -> String {
    format!(
        "你是餐廳的加購推薦助手。顧客目前點了：{}。\
         菜單上還有：{}。\
         請用 {} 回覆一句自然、不超過 40 字的加購建議，只推薦菜單上有的品項。",
        if cart_items.is_empty() {
            "（尚未點餐）".to_string()
        } else {
            cart_items.join("、")
        },
        available_items.join("、"),
        language,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct FlakyGenerator {
        failures_before_success: u32,
        calls: AtomicU32,
    }

    #[async_trait]
    impl TextGenerator for FlakyGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst);
            if n < self.failures_before_success {
                Err(GenerationError::Overloaded(503))
            } else {
                Ok("推薦來份炸豆腐".to_string())
            }
        }
    }

    struct BrokenGenerator;

    #[async_trait]
    impl TextGenerator for BrokenGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
            Err(GenerationError::Api {
                status: 400,
                body: "bad key".into(),
            })
        }
    }

    #[tokio::test(start_paused = true)]
    async fn recovers_after_two_overloads() {
        let generator = FlakyGenerator {
            failures_before_success: 2,
            calls: AtomicU32::new(0),
        };
        let text = generate_with_retry(&generator, "prompt").await.unwrap();
        assert_eq!(text, "推薦來份炸豆腐");
        assert_eq!(generator.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn degrades_to_canned_text_when_always_overloaded() {
        let generator = FlakyGenerator {
            failures_before_success: u32::MAX,
            calls: AtomicU32::new(0),
        };
        let text = generate_with_retry(&generator, "prompt").await.unwrap();
        assert_eq!(text, FALLBACK_RECOMMENDATION);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn hard_fault_is_not_retried() {
        let err = generate_with_retry(&BrokenGenerator, "prompt")
            .await
            .unwrap_err();
        assert!(!err.is_transient());
    }

    #[test]
    fn prompt_mentions_cart_and_menu() {
        let prompt = build_prompt(
            "繁體中文",
            &["珍珠奶茶".into()],
            &["炸豆腐".into(), "滷肉飯".into()],
        );
        assert!(prompt.contains("珍珠奶茶"));
        assert!(prompt.contains("炸豆腐"));
        assert!(prompt.contains("繁體中文"));
    }
}
