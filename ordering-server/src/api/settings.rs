//! 公开设置视图
//!
//! 顾客端一次拉取所有展示用设置：扁平的键值对（布尔键已转为真布尔、
//! 服务费转为数字），外加启用中的公告列表。空库也要回完整视图，三个
//! 核心键永远在场（用默认值补齐）。

use axum::{Json, Router, extract::State, routing::get};
use serde_json::{Map, Value, json};

use crate::core::ServerState;
use crate::db::repository::{announcement, setting};
use crate::utils::{AppError, AppResult};
use shared::models::{
    KEY_SAVE_TO_DATABASE, KEY_SAVE_TO_SHEET, KEY_SERVICE_FEE_PERCENT, OrderingSettings, Setting,
    flatten_settings,
};

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/settings", get(get_settings))
}

/// 扁平设置视图：类型化默认值打底，数据库行覆盖其上
pub(crate) fn settings_view(rows: &[Setting]) -> Map<String, Value> {
    let typed = OrderingSettings::from_rows(rows);
    let mut view = Map::new();
    view.insert(KEY_SAVE_TO_DATABASE.to_string(), json!(typed.save_to_database));
    view.insert(KEY_SAVE_TO_SHEET.to_string(), json!(typed.save_to_sheet));
    view.insert(
        KEY_SERVICE_FEE_PERCENT.to_string(),
        json!(typed.service_fee_percent),
    );
    for (key, value) in flatten_settings(rows) {
        view.insert(key, value);
    }
    view
}

async fn get_settings(State(state): State<ServerState>) -> AppResult<Json<Value>> {
    let rows = setting::find_all(&state.pool).await?;
    let announcements = announcement::find_active(&state.pool).await?;

    let mut body = settings_view(&rows);
    body.insert(
        "announcements".to_string(),
        serde_json::to_value(announcements).map_err(|e| AppError::internal(e.to_string()))?,
    );

    Ok(Json(Value::Object(body)))
}
