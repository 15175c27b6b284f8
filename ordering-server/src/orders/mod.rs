//! 订单提交流程
//!
//! 一张订单从进门到出门：
//!
//! 1. 校验必填字段（桌号、人数、金额、品项列表）
//! 2. 读设置，确定持久化目标；两个目标都关闭 → 直接拒绝
//! 3. 入库（单事务：订单头 + 明细行，失败整体回滚）
//!    或在关闭入库时合成时间型订单号
//! 4. 追加账本（被等待；失败时仅当账本是唯一目标才升级为错误）
//! 5. 推送 LINE 通知（fire-and-forget，永不影响响应）

pub mod submit;

pub use submit::{ValidOrder, format_order_notification, submit_order, validate};
