//! 管理端设置更新
//!
//! 接收扁平键值对，统一存成字符串行，回传更新后的扁平视图。布尔和
//! 数字值按 JSON 原样转成字符串（"true" / "10"），读取侧负责解析。

use axum::{Json, Router, extract::State, routing::put};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::api::settings::settings_view;
use crate::core::ServerState;
use crate::db::repository::setting;
use crate::utils::{AppError, AppResult};

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/admin/settings", put(update_settings))
}

fn to_stored(value: &Value) -> Result<String, AppError> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(AppError::validation("設定值必須是字串、布林或數字。")),
    }
}

async fn update_settings(
    State(state): State<ServerState>,
    Json(body): Json<BTreeMap<String, Value>>,
) -> AppResult<Json<Value>> {
    if body.is_empty() {
        return Err(AppError::validation("沒有要更新的設定。"));
    }

    let mut entries = Vec::with_capacity(body.len());
    for (key, value) in &body {
        entries.push((key.clone(), to_stored(value)?));
    }
    setting::upsert_many(&state.pool, &entries).await?;
    tracing::info!(keys = ?body.keys().collect::<Vec<_>>(), "设置已更新");

    let rows = setting::find_all(&state.pool).await?;
    Ok(Json(Value::Object(settings_view(&rows))))
}
