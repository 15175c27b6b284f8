//! 管理端登录

use axum::{Json, Router, extract::State, routing::post};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/admin/login", post(login))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<Value>> {
    let expected = state
        .config
        .admin_password
        .as_deref()
        .ok_or_else(|| AppError::unavailable("管理功能未啟用。"))?;

    if req.password != expected {
        tracing::warn!("管理端登录失败");
        return Err(AppError::Unauthorized);
    }

    Ok(Json(json!({ "success": true })))
}
