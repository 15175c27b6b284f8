//! Category Repository

use super::{RepoError, RepoResult};
use shared::models::{Category, CategoryCreate, CategoryUpdate, SortOrderUpdate};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, key, label_zh, label_en, sort_order, is_active";

/// Active categories in display order (public menu)
pub async fn find_active(pool: &SqlitePool) -> RepoResult<Vec<Category>> {
    let categories = sqlx::query_as::<_, Category>(&format!(
        "SELECT {COLUMNS} FROM category WHERE is_active = 1 ORDER BY sort_order, id"
    ))
    .fetch_all(pool)
    .await?;
    Ok(categories)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Category>> {
    let categories = sqlx::query_as::<_, Category>(&format!(
        "SELECT {COLUMNS} FROM category ORDER BY sort_order, id"
    ))
    .fetch_all(pool)
    .await?;
    Ok(categories)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Category>> {
    let category =
        sqlx::query_as::<_, Category>(&format!("SELECT {COLUMNS} FROM category WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(category)
}

pub async fn find_by_key(pool: &SqlitePool, key: &str) -> RepoResult<Option<Category>> {
    let category =
        sqlx::query_as::<_, Category>(&format!("SELECT {COLUMNS} FROM category WHERE key = ?"))
            .bind(key)
            .fetch_optional(pool)
            .await?;
    Ok(category)
}

pub async fn create(pool: &SqlitePool, data: CategoryCreate) -> RepoResult<Category> {
    if find_by_key(pool, &data.key).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Category '{}' already exists",
            data.key
        )));
    }
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO category (key, label_zh, label_en, sort_order) VALUES (?1, ?2, ?3, ?4) RETURNING id",
    )
    .bind(&data.key)
    .bind(&data.label_zh)
    .bind(&data.label_en)
    .bind(data.sort_order.unwrap_or(0))
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create category".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: CategoryUpdate) -> RepoResult<Category> {
    let rows = sqlx::query(
        "UPDATE category SET \
            key = COALESCE(?1, key), \
            label_zh = COALESCE(?2, label_zh), \
            label_en = COALESCE(?3, label_en), \
            sort_order = COALESCE(?4, sort_order), \
            is_active = COALESCE(?5, is_active) \
         WHERE id = ?6",
    )
    .bind(&data.key)
    .bind(&data.label_zh)
    .bind(&data.label_en)
    .bind(data.sort_order)
    .bind(data.is_active)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Category {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Category {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let category = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Category {id} not found")))?;

    // Refuse to orphan menu items still pointing at this key
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM menu_item WHERE category_key = ?")
            .bind(&category.key)
            .fetch_one(pool)
            .await?;
    if count > 0 {
        return Err(RepoError::Validation(
            "Cannot delete category with menu items".into(),
        ));
    }

    sqlx::query("DELETE FROM category WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(true)
}

/// Batch sort-order update, applied in one transaction
pub async fn update_sort_orders(pool: &SqlitePool, updates: &[SortOrderUpdate]) -> RepoResult<()> {
    let mut tx = pool.begin().await?;
    for update in updates {
        sqlx::query("UPDATE category SET sort_order = ?1 WHERE id = ?2")
            .bind(update.sort_order)
            .bind(update.id)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;
    Ok(())
}
