//! 图床客户端 (imgbb)
//!
//! 管理端上传菜品图片时，把图片转发到第三方图床并取回公开 URL，
//! 服务器本身不落盘。

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::utils::AppError;

const UPLOAD_ENDPOINT: &str = "https://api.imgbb.com/1/upload";

/// imgbb upload client
pub struct ImageHostClient {
    client: reqwest::Client,
    api_key: String,
}

impl ImageHostClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }

    /// Upload raw image bytes, returning the hosted public URL.
    pub async fn upload(&self, bytes: &[u8]) -> Result<String, AppError> {
        let encoded = BASE64.encode(bytes);
        let resp = self
            .client
            .post(UPLOAD_ENDPOINT)
            .query(&[("key", self.api_key.as_str())])
            .form(&[("image", encoded.as_str())])
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("Image upload failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AppError::upstream(format!(
                "Image host rejected upload (HTTP {status}): {body}"
            )));
        }

        let payload: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| AppError::upstream(format!("Bad image host response: {e}")))?;
        payload["data"]["url"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or_else(|| AppError::upstream("Image host response missing data.url"))
    }
}
