//! 分类管理

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};

use crate::core::ServerState;
use crate::db::repository::category;
use crate::utils::{AppError, AppResult};
use shared::models::{Category, CategoryCreate, CategoryUpdate, SortOrderUpdate};

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/admin/categories", get(list).post(create))
        .route("/api/admin/categories/sort-order", put(reorder))
        .route("/api/admin/categories/{id}", put(update).delete(delete))
}

async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Category>>> {
    Ok(Json(category::find_all(&state.pool).await?))
}

async fn create(
    State(state): State<ServerState>,
    Json(data): Json<CategoryCreate>,
) -> AppResult<(StatusCode, Json<Category>)> {
    if data.key.trim().is_empty() || data.label_zh.trim().is_empty() {
        return Err(AppError::validation("分類的 key 和名稱不可為空。"));
    }
    let created = category::create(&state.pool, data).await?;
    tracing::info!(id = created.id, key = %created.key, "分类已建立");
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(data): Json<CategoryUpdate>,
) -> AppResult<Json<Category>> {
    Ok(Json(category::update(&state.pool, id, data).await?))
}

/// 仍有菜品挂在该分类下时拒绝删除（仓储层校验）
async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    category::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// 批量调整显示顺序（拖拽排序后前端一次送齐）
async fn reorder(
    State(state): State<ServerState>,
    Json(updates): Json<Vec<SortOrderUpdate>>,
) -> AppResult<StatusCode> {
    if updates.is_empty() {
        return Err(AppError::validation("排序清單不可為空。"));
    }
    category::update_sort_orders(&state.pool, &updates).await?;
    Ok(StatusCode::NO_CONTENT)
}
