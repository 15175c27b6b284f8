//! Settings Repository
//!
//! Flat key/value store, read on every order submission. Writes go through
//! an upsert so admin updates never care whether a key already exists.

use super::RepoResult;
use shared::models::Setting;
use sqlx::SqlitePool;

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Setting>> {
    let settings = sqlx::query_as::<_, Setting>("SELECT key, value FROM setting ORDER BY key")
        .fetch_all(pool)
        .await?;
    Ok(settings)
}

pub async fn get(pool: &SqlitePool, key: &str) -> RepoResult<Option<String>> {
    let value: Option<String> = sqlx::query_scalar("SELECT value FROM setting WHERE key = ?")
        .bind(key)
        .fetch_optional(pool)
        .await?;
    Ok(value)
}

/// Insert-or-update one settings key
pub async fn upsert(pool: &SqlitePool, key: &str, value: &str) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO setting (key, value) VALUES (?1, ?2) \
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
    )
    .bind(key)
    .bind(value)
    .execute(pool)
    .await?;
    Ok(())
}

/// Upsert a batch of keys in one transaction
pub async fn upsert_many(pool: &SqlitePool, entries: &[(String, String)]) -> RepoResult<()> {
    let mut tx = pool.begin().await?;
    for (key, value) in entries {
        sqlx::query(
            "INSERT INTO setting (key, value) VALUES (?1, ?2) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MIGRATOR;

    async fn test_pool() -> SqlitePool {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        MIGRATOR.run(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn upsert_inserts_then_overwrites() {
        let pool = test_pool().await;
        upsert(&pool, "saveToSheet", "true").await.unwrap();
        upsert(&pool, "saveToSheet", "false").await.unwrap();
        assert_eq!(
            get(&pool, "saveToSheet").await.unwrap().as_deref(),
            Some("false")
        );
        assert_eq!(find_all(&pool).await.unwrap().len(), 1);
    }
}
