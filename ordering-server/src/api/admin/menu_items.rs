//! 菜品管理

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};

use crate::core::ServerState;
use crate::db::repository::menu_item;
use crate::utils::{AppError, AppResult};
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/admin/menu-items", get(list).post(create))
        .route("/api/admin/menu-items/{id}", put(update).delete(delete))
}

/// 列出所有菜品（含下架的，后台要能编辑）
async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuItem>>> {
    Ok(Json(menu_item::find_all(&state.pool).await?))
}

async fn create(
    State(state): State<ServerState>,
    Json(data): Json<MenuItemCreate>,
) -> AppResult<(StatusCode, Json<MenuItem>)> {
    if data.name_zh.trim().is_empty() {
        return Err(AppError::validation("菜品名稱不可為空。"));
    }
    if data.price < 0.0 {
        return Err(AppError::validation("價格不可為負數。"));
    }
    let item = menu_item::create(&state.pool, data).await?;
    tracing::info!(id = item.id, name = %item.name_zh, "菜品已建立");
    Ok((StatusCode::CREATED, Json(item)))
}

async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(data): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    if matches!(data.price, Some(p) if p < 0.0) {
        return Err(AppError::validation("價格不可為負數。"));
    }
    let item = menu_item::update(&state.pool, id, data).await?;
    Ok(Json(item))
}

async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    if menu_item::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("找不到該菜品。"))
    }
}
