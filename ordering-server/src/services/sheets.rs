//! Google Sheets API client
//!
//! 服务账号鉴权：用 RS256 签一个 JWT 换取短期 access token（缓存到过期前
//! 一分钟），再走普通 REST 调用。只实现账本需要的三个操作：查分页、建
//! 分页、追加一行。

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::Mutex;

use shared::util::now_millis;

const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const SHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

#[derive(Debug, thiserror::Error)]
pub enum SheetsError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Sheets API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    #[error("Auth error: {0}")]
    Auth(String),

    #[error("Unexpected response shape: {0}")]
    BadResponse(String),
}

/// Spreadsheet collaborator seam — swapped for a counting double in tests.
#[async_trait]
pub trait SheetsApi: Send + Sync {
    async fn sheet_exists(&self, title: &str) -> Result<bool, SheetsError>;
    async fn add_sheet(&self, title: &str) -> Result<(), SheetsError>;
    async fn append_row(&self, title: &str, row: Vec<String>) -> Result<(), SheetsError>;
}

/// Service-account credentials (subset of the downloaded JSON key file)
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
}

impl ServiceAccountKey {
    pub fn from_json(raw: &str) -> Result<Self, SheetsError> {
        serde_json::from_str(raw).map_err(|e| SheetsError::Auth(format!("Bad credentials: {e}")))
    }
}

#[derive(serde::Serialize)]
struct TokenClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

/// Google Sheets implementation
pub struct GoogleSheetsClient {
    client: reqwest::Client,
    spreadsheet_id: String,
    key: ServiceAccountKey,
    /// Cached (access_token, expiry_millis)
    token: Mutex<Option<(String, i64)>>,
}

impl GoogleSheetsClient {
    pub fn new(spreadsheet_id: String, key: ServiceAccountKey) -> Self {
        Self {
            client: reqwest::Client::new(),
            spreadsheet_id,
            key,
            token: Mutex::new(None),
        }
    }

    /// Get a valid access token, exchanging a signed JWT when the cached one
    /// is missing or about to expire.
    async fn access_token(&self) -> Result<String, SheetsError> {
        let mut cached = self.token.lock().await;
        if let Some((token, expiry)) = cached.as_ref()
            && now_millis() < expiry - 60_000
        {
            return Ok(token.clone());
        }

        let now_secs = now_millis() / 1000;
        let claims = TokenClaims {
            iss: &self.key.client_email,
            scope: SHEETS_SCOPE,
            aud: TOKEN_ENDPOINT,
            iat: now_secs,
            exp: now_secs + 3600,
        };
        let encoding_key = EncodingKey::from_rsa_pem(self.key.private_key.as_bytes())
            .map_err(|e| SheetsError::Auth(format!("Bad private key: {e}")))?;
        let assertion = jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
            .map_err(|e| SheetsError::Auth(format!("Failed to sign JWT: {e}")))?;

        let resp = self
            .client
            .post(TOKEN_ENDPOINT)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SheetsError::Http(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(SheetsError::Auth(format!(
                "Token exchange failed (HTTP {status}): {body}"
            )));
        }

        #[derive(Deserialize)]
        struct TokenResponse {
            access_token: String,
            expires_in: i64,
        }
        let token: TokenResponse = resp
            .json()
            .await
            .map_err(|e| SheetsError::BadResponse(e.to_string()))?;

        let expiry = now_millis() + token.expires_in * 1000;
        *cached = Some((token.access_token.clone(), expiry));
        Ok(token.access_token)
    }

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response, SheetsError> {
        let status = resp.status();
        if status.is_success() {
            Ok(resp)
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(SheetsError::Api {
                status: status.as_u16(),
                body,
            })
        }
    }
}

#[async_trait]
impl SheetsApi for GoogleSheetsClient {
    async fn sheet_exists(&self, title: &str) -> Result<bool, SheetsError> {
        let token = self.access_token().await?;
        let url = format!(
            "https://sheets.googleapis.com/v4/spreadsheets/{}?fields=sheets.properties.title",
            self.spreadsheet_id
        );
        let resp = self
            .client
            .get(&url)
            .bearer_auth(&token)
            .send()
            .await
            .map_err(|e| SheetsError::Http(e.to_string()))?;
        let payload: serde_json::Value = Self::check(resp)
            .await?
            .json()
            .await
            .map_err(|e| SheetsError::BadResponse(e.to_string()))?;

        let exists = payload["sheets"]
            .as_array()
            .map(|sheets| {
                sheets
                    .iter()
                    .any(|s| s["properties"]["title"].as_str() == Some(title))
            })
            .unwrap_or(false);
        Ok(exists)
    }

    async fn add_sheet(&self, title: &str) -> Result<(), SheetsError> {
        let token = self.access_token().await?;
        let url = format!(
            "https://sheets.googleapis.com/v4/spreadsheets/{}:batchUpdate",
            self.spreadsheet_id
        );
        let body = json!({
            "requests": [{ "addSheet": { "properties": { "title": title } } }],
        });
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await
            .map_err(|e| SheetsError::Http(e.to_string()))?;
        Self::check(resp).await?;
        tracing::info!(sheet = %title, "已建立新的账本分页");
        Ok(())
    }

    async fn append_row(&self, title: &str, row: Vec<String>) -> Result<(), SheetsError> {
        let token = self.access_token().await?;
        let url = format!(
            "https://sheets.googleapis.com/v4/spreadsheets/{}/values/{}!A1:append?valueInputOption=USER_ENTERED",
            self.spreadsheet_id, title
        );
        let body = json!({ "values": [row] });
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await
            .map_err(|e| SheetsError::Http(e.to_string()))?;
        Self::check(resp).await?;
        Ok(())
    }
}
