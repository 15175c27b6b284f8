//! 订单账本 — 每日分页的 Google 试算表
//!
//! 把每张订单追加成账本里的一行，按业务时区日期（`YYYY-MM-DD`）分页。
//! 当天第一张订单先建分页并写表头。
//!
//! 分页检查本身失败时：放弃这次追加并报错，而不是对着一个猜出来的分页
//! 名盲写（盲写到不存在的分页会静默丢数据）。是否把这个错误升级成 HTTP
//! 500 由订单流程决定：账本是唯一持久化目标时升级，否则只记日志。

use std::collections::BTreeMap;
use std::sync::Arc;

use shared::models::{OrderId, OrderLineSubmission};
use shared::util::now_millis;

use super::sheets::{SheetsApi, SheetsError};
use crate::utils::time::{format_business_time, ledger_sheet_title};

/// Fixed header row written when a dated sheet is first created
const HEADER: [&str; 8] = [
    "訂單編號",
    "時間",
    "桌號",
    "人數",
    "小計",
    "服務費",
    "總金額",
    "品項",
];

/// Human-readable labels for option categories (receipt / ledger rendering)
fn option_category_label(key: &str) -> &str {
    match key {
        "spice" => "辣度",
        "sugar" => "甜度",
        "ice" => "冰塊",
        "size" => "份量",
        other => other,
    }
}

/// Render the selected options of one line: `甜度: 半糖, 冰塊: 少冰`
fn render_options(options: &BTreeMap<String, String>) -> String {
    options
        .iter()
        .map(|(key, value)| format!("{}: {}", option_category_label(key), value))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render all line entries into the multi-line item cell
fn render_items(items: &[OrderLineSubmission]) -> String {
    items
        .iter()
        .map(|item| {
            let mut line = format!("{} × {}", item.display_name(), item.quantity);
            if let Some(options) = &item.selected_options
                && !options.is_empty()
            {
                line.push_str(&format!(" ({})", render_options(options)));
            }
            if let Some(notes) = &item.notes
                && !notes.trim().is_empty()
            {
                line.push_str(&format!(" [備註: {}]", notes.trim()));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Appends completed orders to the external spreadsheet ledger.
pub struct LedgerAppender {
    api: Arc<dyn SheetsApi>,
}

impl LedgerAppender {
    pub fn new(api: Arc<dyn SheetsApi>) -> Self {
        Self { api }
    }

    /// Append one order as a ledger row, bootstrapping today's sheet on first
    /// use. Returns an error if the sheet cannot be guaranteed to exist.
    #[allow(clippy::too_many_arguments)]
    pub async fn append_order(
        &self,
        order_id: &OrderId,
        table_number: &str,
        headcount: i64,
        total_amount: f64,
        fee: f64,
        final_amount: f64,
        items: &[OrderLineSubmission],
    ) -> Result<(), SheetsError> {
        let now = now_millis();
        let title = ledger_sheet_title(now);

        if !self.api.sheet_exists(&title).await? {
            self.api.add_sheet(&title).await?;
            self.api
                .append_row(&title, HEADER.iter().map(|s| s.to_string()).collect())
                .await?;
        }

        let row = vec![
            order_id.to_string(),
            format_business_time(now),
            table_number.to_string(),
            headcount.to_string(),
            total_amount.to_string(),
            fee.to_string(),
            final_amount.to_string(),
            render_items(items),
        ];
        self.api.append_row(&title, row).await?;
        tracing::info!(order_id = %order_id, sheet = %title, "订单已写入账本");
        Ok(())
    }
}
