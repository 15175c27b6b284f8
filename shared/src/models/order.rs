//! Order Model
//!
//! An order is immutable once created: the self-ordering flow only ever
//! creates orders with status `received`; status transitions happen in other
//! systems (POS / kitchen), not here.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Initial status of every submitted order
pub const ORDER_STATUS_RECEIVED: &str = "received";

/// Order header row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub table_number: String,
    pub headcount: i64,
    /// Subtotal before service fee
    pub total_amount: f64,
    /// Service fee (may be zero)
    pub fee: f64,
    /// total_amount + fee
    pub final_amount: f64,
    pub status: String,
    /// Unix millis
    pub created_at: i64,
}

/// Order line row, belongs to exactly one order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderLine {
    pub id: i64,
    pub order_id: i64,
    /// Nullable: tolerates preview / synthetic items not present in the menu
    pub menu_item_id: Option<i64>,
    pub name: String,
    pub quantity: i64,
    pub notes: Option<String>,
    /// Option category → chosen value (e.g. {"spice": "小辣"})
    #[cfg_attr(feature = "db", sqlx(json(nullable)))]
    pub selected_options: Option<BTreeMap<String, String>>,
}

/// Identifier handed back to the client for a submitted order.
///
/// Database-assigned integer when the order was persisted, otherwise a
/// synthesized time-based string so notification and ledger formatting still
/// have something to display.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum OrderId {
    Database(i64),
    Fallback(String),
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderId::Database(id) => write!(f, "{id}"),
            OrderId::Fallback(id) => write!(f, "{id}"),
        }
    }
}

/// Item name as submitted by the frontend — either a plain string or a
/// localized object (`{"zh": "...", "en": "..."}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemName {
    Text(String),
    Localized {
        zh: Option<String>,
        en: Option<String>,
    },
}

impl ItemName {
    /// Preferred display name (zh first, matching receipts and the ledger)
    pub fn display(&self) -> &str {
        match self {
            ItemName::Text(s) => s,
            ItemName::Localized { zh: Some(s), .. } => s,
            ItemName::Localized {
                zh: None,
                en: Some(s),
            } => s,
            ItemName::Localized { zh: None, en: None } => "未知品項",
        }
    }
}

/// Raw order submission (`POST /api/orders` body)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSubmission {
    pub table_number: Option<String>,
    pub headcount: Option<i64>,
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub fee: Option<f64>,
    #[serde(default)]
    pub final_amount: Option<f64>,
    pub items: Option<Vec<OrderLineSubmission>>,
}

/// One submitted line entry
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineSubmission {
    pub id: Option<i64>,
    pub quantity: i64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub selected_options: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub name: Option<ItemName>,
}

impl OrderLineSubmission {
    pub fn display_name(&self) -> &str {
        self.name.as_ref().map(|n| n.display()).unwrap_or("未知品項")
    }
}
