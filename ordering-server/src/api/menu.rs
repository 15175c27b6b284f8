//! Menu API — 顾客端菜单
//!
//! 返回 `{ menu: { <categoryKey>: MenuItem[] }, categories: Category[] }`，
//! 只含上架品项和启用分类，按 sort_order 排序。

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::core::ServerState;
use crate::db::repository::{category, menu_item};
use crate::utils::AppResult;
use shared::models::{Category, MenuItem};

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/menu", get(get_menu))
}

#[derive(Debug, Serialize)]
pub struct MenuResponse {
    pub menu: BTreeMap<String, Vec<MenuItem>>,
    pub categories: Vec<Category>,
}

async fn get_menu(State(state): State<ServerState>) -> AppResult<Json<MenuResponse>> {
    let categories = category::find_active(&state.pool).await?;
    let items = menu_item::find_available(&state.pool).await?;

    // Every active category appears, even when it has no items yet.
    let mut menu: BTreeMap<String, Vec<MenuItem>> = categories
        .iter()
        .map(|c| (c.key.clone(), Vec::new()))
        .collect();
    for item in items {
        menu.entry(item.category_key.clone()).or_default().push(item);
    }

    Ok(Json(MenuResponse { menu, categories }))
}
