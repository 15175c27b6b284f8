//! Category Model

use serde::{Deserialize, Serialize};

/// Menu category entity
///
/// `key` is the stable identifier used by the frontend to group menu items
/// (e.g. "noodles", "drinks"); labels are what customers actually see.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Category {
    pub id: i64,
    pub key: String,
    pub label_zh: String,
    pub label_en: Option<String>,
    pub sort_order: i64,
    pub is_active: bool,
}

/// Create category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryCreate {
    pub key: String,
    pub label_zh: String,
    pub label_en: Option<String>,
    pub sort_order: Option<i64>,
}

/// Update category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryUpdate {
    pub key: Option<String>,
    pub label_zh: Option<String>,
    pub label_en: Option<String>,
    pub sort_order: Option<i64>,
    pub is_active: Option<bool>,
}

/// One entry of a batch sort-order update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortOrderUpdate {
    pub id: i64,
    pub sort_order: i64,
}
