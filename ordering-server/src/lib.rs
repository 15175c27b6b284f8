//! Ordering Server - 餐厅自助点餐系统后端
//!
//! # 架构概述
//!
//! 单体 HTTP 服务，面向两类用户：扫码点餐的顾客和管理后台的店家。
//!
//! - **HTTP API** (`api`): 公开接口（菜单、设置、下单、AI 推荐）+ 管理端
//! - **订单流程** (`orders`): 校验 → 设置闸门 → 落库 → 账本 → 通知
//! - **数据库** (`db`): SQLite (sqlx)，仓储层 + 迁移
//! - **外部协作** (`services`): LINE 推送、Google Sheets 账本、Gemini、图床
//!
//! # 模块结构
//!
//! ```text
//! ordering-server/src/
//! ├── core/          # 配置、状态、服务器装配
//! ├── api/           # HTTP 路由和处理器
//! ├── orders/        # 订单提交流程
//! ├── services/      # 外部协作方客户端
//! ├── db/            # 数据库层
//! └── utils/         # 错误、日志、重试、时间
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod orders;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use crate::core::{Config, Server, ServerState, build_router};
pub use db::DbService;
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

/// 进程启动前的环境准备：加载 .env、初始化日志
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
   ____          __          _
  / __ \_________/ /__  _____(_)___  ____ _
 / / / / ___/ __  / _ \/ ___/ / __ \/ __ `/
/ /_/ / /  / /_/ /  __/ /  / / / / / /_/ /
\____/_/   \__,_/\___/_/  /_/_/ /_/\__, /
                                  /____/
    "#
    );
}
