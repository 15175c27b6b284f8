//! AI 加购推荐
//!
//! 生成器未配置时回 503；上游持续过载时 [`generate_with_retry`] 已经
//! 退化为罐头文案，不会把重试失败暴露给顾客。

use axum::{Json, Router, extract::State, routing::post};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::core::ServerState;
use crate::services::gemini::{build_prompt, generate_with_retry};
use crate::utils::{AppError, AppResult};

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/recommendation", post(recommend))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub language: Option<String>,
    #[serde(default)]
    pub cart_items: Vec<String>,
    #[serde(default)]
    pub available_items: Vec<String>,
}

async fn recommend(
    State(state): State<ServerState>,
    Json(req): Json<RecommendationRequest>,
) -> AppResult<Json<Value>> {
    let generator = state
        .generator
        .as_ref()
        .ok_or_else(|| AppError::unavailable("推薦服務未啟用。"))?;

    let language = req.language.as_deref().unwrap_or("繁體中文");
    let prompt = build_prompt(language, &req.cart_items, &req.available_items);
    let text = generate_with_retry(generator.as_ref(), &prompt)
        .await
        .map_err(|e| AppError::upstream(e.to_string()))?;

    Ok(Json(json!({ "recommendation": text })))
}
