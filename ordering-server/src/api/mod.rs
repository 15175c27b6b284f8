//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`menu`] - 菜单（公开）
//! - [`settings`] - 设置 + 公告（公开，扁平化视图）
//! - [`orders`] - 订单提交（公开）
//! - [`recommendation`] - AI 加购推荐（公开）
//! - [`admin`] - 管理端（登录、设置、菜单/分类/公告 CRUD、图片上传）

pub mod admin;
pub mod health;
pub mod menu;
pub mod orders;
pub mod recommendation;
pub mod settings;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
