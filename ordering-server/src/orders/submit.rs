//! Order submission workflow

use std::sync::Arc;

use sqlx::SqlitePool;

use shared::models::{OrderId, OrderLineSubmission, OrderSubmission, OrderingSettings};
use shared::util::fallback_order_id;

use crate::db::repository::{order as order_repo, setting as setting_repo};
use crate::services::{LedgerAppender, OrderNotifier};
use crate::utils::{AppError, AppResult};

/// A submission that passed validation
#[derive(Debug)]
pub struct ValidOrder {
    pub table_number: String,
    pub headcount: i64,
    pub total_amount: f64,
    pub fee: f64,
    pub final_amount: f64,
    pub items: Vec<OrderLineSubmission>,
}

/// Check required fields on a raw submission.
///
/// Deliberately shallow — table/headcount/subtotal present and a non-empty
/// item list. `final_amount` is always recomputed as subtotal + fee so the
/// persisted invariant holds regardless of what the client sent.
pub fn validate(submission: OrderSubmission) -> AppResult<ValidOrder> {
    let table_number = submission
        .table_number
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::validation("訂單缺少桌號或人數。"))?;
    let headcount = submission
        .headcount
        .ok_or_else(|| AppError::validation("訂單缺少桌號或人數。"))?;
    let total_amount = submission
        .total_amount
        .ok_or_else(|| AppError::validation("訂單缺少金額資訊。"))?;
    let items = submission
        .items
        .filter(|items| !items.is_empty())
        .ok_or_else(|| AppError::validation("訂單內容不可為空。"))?;

    // Fee may arrive explicitly or be implied by finalAmount - totalAmount.
    let fee = submission
        .fee
        .or(submission.final_amount.map(|f| f - total_amount))
        .unwrap_or(0.0);

    Ok(ValidOrder {
        table_number,
        headcount,
        total_amount,
        fee,
        final_amount: total_amount + fee,
        items,
    })
}

/// Fixed-layout staff notification text
pub fn format_order_notification(
    order_id: &OrderId,
    table_number: &str,
    headcount: i64,
    final_amount: f64,
    items: &[OrderLineSubmission],
) -> String {
    let mut message = format!("🔔 新訂單通知！(單號 #{order_id})\n");
    message.push_str(&format!("桌號: {table_number}\n"));
    message.push_str(&format!("人數: {headcount}\n"));
    message.push_str("-------------------\n");
    for item in items {
        message.push_str(&format!("‣ {} x {}\n", item.display_name(), item.quantity));
        if let Some(notes) = &item.notes
            && !notes.trim().is_empty()
        {
            message.push_str(&format!("  備註: {}\n", notes.trim()));
        }
    }
    message.push_str("-------------------\n");
    message.push_str(&format!("總金額: NT$ {final_amount}"));
    message
}

/// Run the full submission workflow. Returns the order id handed back to the
/// client (database-assigned, or synthesized when the database target is off).
pub async fn submit_order(
    pool: &SqlitePool,
    notifier: Option<Arc<dyn OrderNotifier>>,
    ledger: Option<&LedgerAppender>,
    submission: OrderSubmission,
) -> AppResult<OrderId> {
    let order = validate(submission)?;

    // Settings are read fresh on every submission — admin toggles take effect
    // immediately.
    let rows = setting_repo::find_all(pool).await?;
    let settings = OrderingSettings::from_rows(&rows);
    if !settings.has_persistence_target() {
        return Err(AppError::NoPersistenceTarget);
    }

    let order_id = if settings.save_to_database {
        let persisted = order_repo::create(
            pool,
            &order.table_number,
            order.headcount,
            order.total_amount,
            order.fee,
            order.final_amount,
            &order.items,
        )
        .await?;
        tracing::info!(order_id = persisted.id, "订单 #{} 已成功储存至数据库", persisted.id);
        OrderId::Database(persisted.id)
    } else {
        OrderId::Fallback(fallback_order_id())
    };

    if settings.save_to_sheet {
        match ledger {
            Some(ledger) => {
                if let Err(e) = ledger
                    .append_order(
                        &order_id,
                        &order.table_number,
                        order.headcount,
                        order.total_amount,
                        order.fee,
                        order.final_amount,
                        &order.items,
                    )
                    .await
                {
                    if settings.save_to_database {
                        // Order is already durable in the database; losing the
                        // ledger row is an ops problem, not the customer's.
                        tracing::warn!(order_id = %order_id, error = %e, "账本追加失败，订单已入库");
                    } else {
                        return Err(AppError::upstream(format!("Ledger append failed: {e}")));
                    }
                }
            }
            None => tracing::warn!("账本未配置，跳过试算表记录"),
        }
    }

    // Best-effort notification, fire-and-forget relative to the response.
    if let Some(notifier) = notifier {
        let text = format_order_notification(
            &order_id,
            &order.table_number,
            order.headcount,
            order.final_amount,
            &order.items,
        );
        tokio::spawn(async move {
            if let Err(e) = notifier.push_text(&text).await {
                tracing::warn!(error = %e, "发送 LINE 消息失败");
            }
        });
    }

    Ok(order_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MIGRATOR;
    use crate::services::NotifyError;
    use crate::services::ledger::tests::MockSheets;
    use async_trait::async_trait;
    use shared::models::ItemName;
    use std::collections::BTreeMap;
    use std::time::Duration;
    use tokio::sync::mpsc;

    async fn test_pool() -> SqlitePool {
        let pool = sqlx::sqlite::SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        MIGRATOR.run(&pool).await.unwrap();
        pool
    }

    async fn set_flags(pool: &SqlitePool, to_db: bool, to_sheet: bool) {
        setting_repo::upsert(pool, "saveToDatabase", if to_db { "true" } else { "false" })
            .await
            .unwrap();
        setting_repo::upsert(pool, "saveToSheet", if to_sheet { "true" } else { "false" })
            .await
            .unwrap();
    }

    struct RecordingNotifier {
        sender: mpsc::UnboundedSender<String>,
    }

    #[async_trait]
    impl OrderNotifier for RecordingNotifier {
        async fn push_text(&self, text: &str) -> Result<(), NotifyError> {
            self.sender.send(text.to_string()).unwrap();
            Ok(())
        }
    }

    fn submission() -> OrderSubmission {
        OrderSubmission {
            table_number: Some("5".into()),
            headcount: Some(2),
            total_amount: Some(300.0),
            fee: Some(9.0),
            final_amount: Some(309.0),
            items: Some(vec![OrderLineSubmission {
                id: Some(7),
                quantity: 2,
                notes: Some("少冰".into()),
                selected_options: Some(BTreeMap::from([(
                    "ice".to_string(),
                    "少冰".to_string(),
                )])),
                name: Some(ItemName::Localized {
                    zh: Some("珍珠奶茶".into()),
                    en: Some("Bubble Tea".into()),
                }),
            }]),
        }
    }

    #[tokio::test]
    async fn full_flow_persists_appends_and_notifies() {
        let pool = test_pool().await;
        set_flags(&pool, true, true).await;

        let sheets = Arc::new(MockSheets::default());
        let ledger = LedgerAppender::new(sheets.clone());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let notifier: Arc<dyn OrderNotifier> = Arc::new(RecordingNotifier { sender: tx });

        let order_id = submit_order(&pool, Some(notifier), Some(&ledger), submission())
            .await
            .unwrap();

        let db_id = match order_id {
            OrderId::Database(id) => id,
            OrderId::Fallback(_) => panic!("expected a database id"),
        };

        let order = order_repo::find_by_id(&pool, db_id).await.unwrap().unwrap();
        assert_eq!(order.final_amount, 309.0);
        assert_eq!(order.total_amount + order.fee, order.final_amount);

        let lines = order_repo::find_lines(&pool, db_id).await.unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 2);

        // One dated sheet created, header + one data row appended.
        assert_eq!(*sheets.created.lock().unwrap(), 1);
        assert_eq!(sheets.rows.lock().unwrap().len(), 2);

        // Notification is spawned; wait for the double to receive it.
        let text = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("notification should be attempted")
            .unwrap();
        assert!(text.contains("桌號: 5"));
        assert!(text.contains("珍珠奶茶 x 2"));
        assert!(text.contains("總金額: NT$ 309"));
    }

    #[tokio::test]
    async fn missing_fields_reject_before_persistence() {
        let pool = test_pool().await;
        set_flags(&pool, true, true).await;

        for broken in [
            OrderSubmission {
                table_number: None,
                ..submission()
            },
            OrderSubmission {
                headcount: None,
                ..submission()
            },
            OrderSubmission {
                total_amount: None,
                ..submission()
            },
            OrderSubmission {
                items: None,
                ..submission()
            },
            OrderSubmission {
                items: Some(vec![]),
                ..submission()
            },
        ] {
            let err = submit_order(&pool, None, None, broken).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn both_targets_disabled_rejects_without_side_effects() {
        let pool = test_pool().await;
        set_flags(&pool, false, false).await;

        let sheets = Arc::new(MockSheets::default());
        let ledger = LedgerAppender::new(sheets.clone());

        let err = submit_order(&pool, None, Some(&ledger), submission())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NoPersistenceTarget));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
        assert!(sheets.rows.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn sheet_only_mode_synthesizes_order_id() {
        let pool = test_pool().await;
        set_flags(&pool, false, true).await;

        let sheets = Arc::new(MockSheets::default());
        let ledger = LedgerAppender::new(sheets.clone());

        let order_id = submit_order(&pool, None, Some(&ledger), submission())
            .await
            .unwrap();

        match order_id {
            OrderId::Fallback(id) => assert!(id.starts_with('T')),
            OrderId::Database(_) => panic!("database target is disabled"),
        }

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
        assert_eq!(sheets.rows.lock().unwrap().len(), 2); // header + data
    }

    #[tokio::test]
    async fn ledger_failure_is_tolerated_when_database_holds_the_order() {
        let pool = test_pool().await;
        set_flags(&pool, true, true).await;

        let sheets = Arc::new(MockSheets {
            fail_exists_check: true,
            ..Default::default()
        });
        let ledger = LedgerAppender::new(sheets);

        let order_id = submit_order(&pool, None, Some(&ledger), submission())
            .await
            .unwrap();
        assert!(matches!(order_id, OrderId::Database(_)));
    }

    #[tokio::test]
    async fn ledger_failure_propagates_when_it_is_the_only_target() {
        let pool = test_pool().await;
        set_flags(&pool, false, true).await;

        let sheets = Arc::new(MockSheets {
            fail_exists_check: true,
            ..Default::default()
        });
        let ledger = LedgerAppender::new(sheets);

        let err = submit_order(&pool, None, Some(&ledger), submission())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }

    #[test]
    fn notification_layout_matches_receipt_format() {
        let text = format_order_notification(
            &OrderId::Database(12),
            "5",
            2,
            309.0,
            &[OrderLineSubmission {
                id: Some(7),
                quantity: 2,
                notes: Some("少冰".into()),
                selected_options: None,
                name: Some(ItemName::Text("珍珠奶茶".into())),
            }],
        );
        assert_eq!(
            text,
            "🔔 新訂單通知！(單號 #12)\n桌號: 5\n人數: 2\n-------------------\n‣ 珍珠奶茶 x 2\n  備註: 少冰\n-------------------\n總金額: NT$ 309"
        );
    }
}
