//! Menu Item Repository

use super::{RepoError, RepoResult};
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use sqlx::SqlitePool;
use std::collections::BTreeMap;

const COLUMNS: &str = "id, category_key, name_zh, name_en, description, price, image_url, options, is_available, sort_order";

fn options_json(options: &Option<BTreeMap<String, Vec<String>>>) -> RepoResult<Option<String>> {
    match options {
        Some(map) if !map.is_empty() => serde_json::to_string(map)
            .map(Some)
            .map_err(|e| RepoError::Database(format!("Bad options: {e}"))),
        _ => Ok(None),
    }
}

/// All available items ordered for display (public menu)
pub async fn find_available(pool: &SqlitePool) -> RepoResult<Vec<MenuItem>> {
    let items = sqlx::query_as::<_, MenuItem>(&format!(
        "SELECT {COLUMNS} FROM menu_item WHERE is_available = 1 ORDER BY sort_order, id"
    ))
    .fetch_all(pool)
    .await?;
    Ok(items)
}

/// All items including unavailable ones (admin view)
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<MenuItem>> {
    let items = sqlx::query_as::<_, MenuItem>(&format!(
        "SELECT {COLUMNS} FROM menu_item ORDER BY sort_order, id"
    ))
    .fetch_all(pool)
    .await?;
    Ok(items)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<MenuItem>> {
    let item =
        sqlx::query_as::<_, MenuItem>(&format!("SELECT {COLUMNS} FROM menu_item WHERE id = ?"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
    Ok(item)
}

pub async fn create(pool: &SqlitePool, data: MenuItemCreate) -> RepoResult<MenuItem> {
    let options = options_json(&data.options)?;
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO menu_item (category_key, name_zh, name_en, description, price, image_url, options, sort_order) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8) RETURNING id",
    )
    .bind(&data.category_key)
    .bind(&data.name_zh)
    .bind(&data.name_en)
    .bind(&data.description)
    .bind(data.price)
    .bind(&data.image_url)
    .bind(options)
    .bind(data.sort_order.unwrap_or(0))
    .fetch_one(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create menu item".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: MenuItemUpdate) -> RepoResult<MenuItem> {
    let options = options_json(&data.options)?;
    let rows = sqlx::query(
        "UPDATE menu_item SET \
            category_key = COALESCE(?1, category_key), \
            name_zh = COALESCE(?2, name_zh), \
            name_en = COALESCE(?3, name_en), \
            description = COALESCE(?4, description), \
            price = COALESCE(?5, price), \
            image_url = COALESCE(?6, image_url), \
            options = COALESCE(?7, options), \
            is_available = COALESCE(?8, is_available), \
            sort_order = COALESCE(?9, sort_order) \
         WHERE id = ?10",
    )
    .bind(&data.category_key)
    .bind(&data.name_zh)
    .bind(&data.name_en)
    .bind(&data.description)
    .bind(data.price)
    .bind(&data.image_url)
    .bind(options)
    .bind(data.is_available)
    .bind(data.sort_order)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Menu item {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Menu item {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM menu_item WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
