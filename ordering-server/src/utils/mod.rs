//! 工具模块

pub mod error;
pub mod logger;
pub mod retry;
pub mod time;

pub use error::{AppError, AppResult};
pub use retry::{RetryOutcome, retry_with_backoff};
