//! 近期订单查询

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::repository::order;
use crate::utils::AppResult;
use shared::models::{Order, OrderLine};

const DEFAULT_LIMIT: i64 = 50;
const MAX_LIMIT: i64 = 200;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/admin/orders", get(list_recent))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct OrderWithLines {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderLine>,
}

async fn list_recent(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<OrderWithLines>>> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let orders = order::find_recent(&state.pool, limit).await?;

    let mut result = Vec::with_capacity(orders.len());
    for header in orders {
        let items = order::find_lines(&state.pool, header.id).await?;
        result.push(OrderWithLines {
            order: header,
            items,
        });
    }
    Ok(Json(result))
}
