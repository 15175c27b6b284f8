//! 管理端 API
//!
//! 店家后台用的接口，全部挂在 `/api/admin` 下：
//!
//! - [`auth`] - 登录（口令比对）
//! - [`settings`] - 营运开关与服务费
//! - [`menu_items`] / [`categories`] / [`announcements`] - 内容管理
//! - [`orders`] - 近期订单查询
//! - [`upload`] - 菜品图片上传（转外部图床）

use axum::Router;

use crate::core::ServerState;

pub mod announcements;
pub mod auth;
pub mod categories;
pub mod menu_items;
pub mod orders;
pub mod settings;
pub mod upload;

pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(auth::router())
        .merge(settings::router())
        .merge(menu_items::router())
        .merge(categories::router())
        .merge(announcements::router())
        .merge(orders::router())
        .merge(upload::router())
}
