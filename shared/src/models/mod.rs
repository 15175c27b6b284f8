//! Data models
//!
//! Shared between ordering-server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod announcement;
pub mod category;
pub mod menu_item;
pub mod order;
pub mod setting;

// Re-exports
pub use announcement::*;
pub use category::*;
pub use menu_item::*;
pub use order::*;
pub use setting::*;
