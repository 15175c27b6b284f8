//! 外部协作服务
//!
//! 所有外部协作方（LINE 推送、Google Sheets 账本、生成式 AI、图床）都以
//! 显式构造的客户端注入 `ServerState`，凭据缺失时构造为 `None`（该协作方
//! 整体禁用），测试里用 trait 替身替换。

pub mod gemini;
pub mod image_host;
pub mod ledger;
pub mod line;
pub mod sheets;

pub use gemini::{GeminiClient, GenerationError, TextGenerator};
pub use image_host::ImageHostClient;
pub use ledger::LedgerAppender;
pub use line::{LineNotifier, NotifyError, OrderNotifier};
pub use sheets::{GoogleSheetsClient, SheetsApi, SheetsError};
