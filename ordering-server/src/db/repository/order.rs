//! Order Repository
//!
//! The insert is the one place in this codebase that needs transactional
//! discipline: the order header and its lines are written as a single unit of
//! work. Any failure rolls the whole unit back — no partial order is ever
//! visible to readers.

use super::{RepoError, RepoResult};
use shared::models::{ORDER_STATUS_RECEIVED, Order, OrderLine, OrderLineSubmission};
use shared::util::now_millis;
use sqlx::SqlitePool;

/// Atomically insert an order header and one line per submitted item.
/// Returns the persisted order (with its database-assigned id).
pub async fn create(
    pool: &SqlitePool,
    table_number: &str,
    headcount: i64,
    total_amount: f64,
    fee: f64,
    final_amount: f64,
    items: &[OrderLineSubmission],
) -> RepoResult<Order> {
    let created_at = now_millis();

    let mut tx = pool.begin().await?;

    let order_id: i64 = sqlx::query_scalar(
        "INSERT INTO orders (table_number, headcount, total_amount, fee, final_amount, status, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) RETURNING id",
    )
    .bind(table_number)
    .bind(headcount)
    .bind(total_amount)
    .bind(fee)
    .bind(final_amount)
    .bind(ORDER_STATUS_RECEIVED)
    .bind(created_at)
    .fetch_one(&mut *tx)
    .await?;

    for item in items {
        let selected_options = match &item.selected_options {
            Some(map) if !map.is_empty() => Some(
                serde_json::to_string(map)
                    .map_err(|e| RepoError::Database(format!("Bad selected_options: {e}")))?,
            ),
            _ => None,
        };
        sqlx::query(
            "INSERT INTO order_line (order_id, menu_item_id, name, quantity, notes, selected_options) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(order_id)
        .bind(item.id)
        .bind(item.display_name())
        .bind(item.quantity)
        .bind(&item.notes)
        .bind(selected_options)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await?;

    find_by_id(pool, order_id)
        .await?
        .ok_or_else(|| RepoError::Database("Order vanished after insert".into()))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(
        "SELECT id, table_number, headcount, total_amount, fee, final_amount, status, created_at \
         FROM orders WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(order)
}

pub async fn find_lines(pool: &SqlitePool, order_id: i64) -> RepoResult<Vec<OrderLine>> {
    let lines = sqlx::query_as::<_, OrderLine>(
        "SELECT id, order_id, menu_item_id, name, quantity, notes, selected_options \
         FROM order_line WHERE order_id = ? ORDER BY id",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;
    Ok(lines)
}

/// Recent order headers, newest first (admin view)
pub async fn find_recent(pool: &SqlitePool, limit: i64) -> RepoResult<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(
        "SELECT id, table_number, headcount, total_amount, fee, final_amount, status, created_at \
         FROM orders ORDER BY created_at DESC LIMIT ?",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(orders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MIGRATOR;
    use std::collections::BTreeMap;

    async fn test_pool() -> SqlitePool {
        // Single connection: every connection to `:memory:` is its own database
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        MIGRATOR.run(&pool).await.unwrap();
        pool
    }

    fn line(quantity: i64) -> OrderLineSubmission {
        OrderLineSubmission {
            id: Some(7),
            quantity,
            notes: Some("少冰".into()),
            selected_options: Some(BTreeMap::from([("ice".to_string(), "少冰".to_string())])),
            name: Some(shared::models::ItemName::Text("珍珠奶茶".into())),
        }
    }

    #[tokio::test]
    async fn create_persists_header_and_lines() {
        let pool = test_pool().await;

        let order = create(&pool, "5", 2, 300.0, 9.0, 309.0, &[line(2)])
            .await
            .unwrap();

        assert_eq!(order.table_number, "5");
        assert_eq!(order.status, ORDER_STATUS_RECEIVED);
        assert_eq!(order.final_amount, 309.0);

        let lines = find_lines(&pool, order.id).await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 2);
        assert_eq!(lines[0].name, "珍珠奶茶");
        assert_eq!(
            lines[0].selected_options.as_ref().unwrap().get("ice"),
            Some(&"少冰".to_string())
        );
    }

    #[tokio::test]
    async fn failed_line_insert_rolls_back_header() {
        let pool = test_pool().await;

        // Second line violates the quantity >= 1 CHECK constraint.
        let result = create(&pool, "3", 4, 500.0, 0.0, 500.0, &[line(1), line(0)]).await;
        assert!(result.is_err());

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0, "no partial order may remain visible");

        let line_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_line")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(line_count, 0);
    }
}
