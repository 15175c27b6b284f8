//! Announcement Repository

use super::{RepoError, RepoResult};
use shared::models::{Announcement, AnnouncementCreate, AnnouncementUpdate, SortOrderUpdate};
use shared::util::now_millis;
use sqlx::SqlitePool;

const COLUMNS: &str = "id, content, is_active, sort_order, created_at";

/// Active announcements in display order (shown on the ordering page)
pub async fn find_active(pool: &SqlitePool) -> RepoResult<Vec<Announcement>> {
    let announcements = sqlx::query_as::<_, Announcement>(&format!(
        "SELECT {COLUMNS} FROM announcement WHERE is_active = 1 ORDER BY sort_order, id"
    ))
    .fetch_all(pool)
    .await?;
    Ok(announcements)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Announcement>> {
    let announcements = sqlx::query_as::<_, Announcement>(&format!(
        "SELECT {COLUMNS} FROM announcement ORDER BY sort_order, id"
    ))
    .fetch_all(pool)
    .await?;
    Ok(announcements)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Announcement>> {
    let announcement = sqlx::query_as::<_, Announcement>(&format!(
        "SELECT {COLUMNS} FROM announcement WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(announcement)
}

pub async fn create(pool: &SqlitePool, data: AnnouncementCreate) -> RepoResult<Announcement> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO announcement (content, sort_order, created_at) VALUES (?1, ?2, ?3) RETURNING id",
    )
    .bind(&data.content)
    .bind(data.sort_order.unwrap_or(0))
    .bind(now_millis())
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create announcement".into()))
}

pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: AnnouncementUpdate,
) -> RepoResult<Announcement> {
    let rows = sqlx::query(
        "UPDATE announcement SET \
            content = COALESCE(?1, content), \
            is_active = COALESCE(?2, is_active), \
            sort_order = COALESCE(?3, sort_order) \
         WHERE id = ?4",
    )
    .bind(&data.content)
    .bind(data.is_active)
    .bind(data.sort_order)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Announcement {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Announcement {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM announcement WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Batch sort-order update, applied in one transaction
pub async fn update_sort_orders(pool: &SqlitePool, updates: &[SortOrderUpdate]) -> RepoResult<()> {
    let mut tx = pool.begin().await?;
    for update in updates {
        sqlx::query("UPDATE announcement SET sort_order = ?1 WHERE id = ?2")
            .bind(update.sort_order)
            .bind(update.id)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;
    Ok(())
}
