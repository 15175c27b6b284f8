//! 订单提交入口
//!
//! `POST /api/orders` 接收顾客购物车，走 [`crate::orders::submit_order`]
//! 的完整流程。成功回 `201 Created`，带确认讯息和订单编号（数据库自增
//! ID 或降级流水号）。

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use serde::Serialize;

use crate::core::ServerState;
use crate::orders::submit_order;
use crate::utils::AppResult;
use shared::models::{OrderId, OrderSubmission};

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/orders", post(create_order))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderAccepted {
    pub message: String,
    pub order_id: OrderId,
}

async fn create_order(
    State(state): State<ServerState>,
    Json(submission): Json<OrderSubmission>,
) -> AppResult<(StatusCode, Json<OrderAccepted>)> {
    let order_id = submit_order(
        &state.pool,
        state.notifier.clone(),
        state.ledger.as_deref(),
        submission,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(OrderAccepted {
            message: "訂單已成功接收！".to_string(),
            order_id,
        }),
    ))
}
