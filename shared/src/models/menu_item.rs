//! Menu Item Model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Menu item entity
///
/// `options` maps an option category (e.g. "spice", "sugar", "ice") to the
/// values the customer may pick from. Stored as a JSON column in SQLite.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItem {
    pub id: i64,
    pub category_key: String,
    pub name_zh: String,
    pub name_en: Option<String>,
    pub description: Option<String>,
    pub price: f64,
    pub image_url: Option<String>,
    #[cfg_attr(feature = "db", sqlx(json(nullable)))]
    pub options: Option<BTreeMap<String, Vec<String>>>,
    pub is_available: bool,
    pub sort_order: i64,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub category_key: String,
    pub name_zh: String,
    pub name_en: Option<String>,
    pub description: Option<String>,
    pub price: f64,
    pub image_url: Option<String>,
    pub options: Option<BTreeMap<String, Vec<String>>>,
    pub sort_order: Option<i64>,
}

/// Update menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub category_key: Option<String>,
    pub name_zh: Option<String>,
    pub name_en: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image_url: Option<String>,
    pub options: Option<BTreeMap<String, Vec<String>>>,
    pub is_available: Option<bool>,
    pub sort_order: Option<i64>,
}
