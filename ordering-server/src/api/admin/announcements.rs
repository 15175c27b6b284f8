//! 公告管理

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};

use crate::core::ServerState;
use crate::db::repository::announcement;
use crate::utils::{AppError, AppResult};
use shared::models::{Announcement, AnnouncementCreate, AnnouncementUpdate, SortOrderUpdate};

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/admin/announcements", get(list).post(create))
        .route("/api/admin/announcements/sort-order", put(reorder))
        .route("/api/admin/announcements/{id}", put(update).delete(delete))
}

async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Announcement>>> {
    Ok(Json(announcement::find_all(&state.pool).await?))
}

async fn create(
    State(state): State<ServerState>,
    Json(data): Json<AnnouncementCreate>,
) -> AppResult<(StatusCode, Json<Announcement>)> {
    if data.content.trim().is_empty() {
        return Err(AppError::validation("公告內容不可為空。"));
    }
    let created = announcement::create(&state.pool, data).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(data): Json<AnnouncementUpdate>,
) -> AppResult<Json<Announcement>> {
    Ok(Json(announcement::update(&state.pool, id, data).await?))
}

async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    if announcement::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found("找不到該公告。"))
    }
}

async fn reorder(
    State(state): State<ServerState>,
    Json(updates): Json<Vec<SortOrderUpdate>>,
) -> AppResult<StatusCode> {
    if updates.is_empty() {
        return Err(AppError::validation("排序清單不可為空。"));
    }
    announcement::update_sort_orders(&state.pool, &updates).await?;
    Ok(StatusCode::NO_CONTENT)
}
