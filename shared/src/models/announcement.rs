//! Announcement Model

use serde::{Deserialize, Serialize};

/// Storefront announcement shown on the ordering page
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Announcement {
    pub id: i64,
    pub content: String,
    pub is_active: bool,
    pub sort_order: i64,
    /// Unix millis
    pub created_at: i64,
}

/// Create announcement payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnouncementCreate {
    pub content: String,
    pub sort_order: Option<i64>,
}

/// Update announcement payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnnouncementUpdate {
    pub content: Option<String>,
    pub is_active: Option<bool>,
    pub sort_order: Option<i64>,
}
