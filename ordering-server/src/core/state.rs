use std::sync::Arc;

use sqlx::SqlitePool;

use crate::core::Config;
use crate::db::DbService;
use crate::services::{
    GeminiClient, GoogleSheetsClient, ImageHostClient, LedgerAppender, LineNotifier,
    OrderNotifier, TextGenerator,
    sheets::ServiceAccountKey,
};
use crate::utils::AppError;

/// 服务器状态 — 持有连接池和所有外部协作方客户端
///
/// 所有协作方都是显式构造后注入的（没有进程级单例），凭据缺失的协作方
/// 构造为 `None`。`Clone` 是浅拷贝（Arc / 池句柄），每个请求拿到的都是
/// 同一批长连接。
///
/// | 字段 | 说明 |
/// |------|------|
/// | config | 配置项 (不可变) |
/// | pool | SQLite 连接池 |
/// | notifier | LINE 推送（可选） |
/// | ledger | 试算表账本（可选） |
/// | generator | 生成式 AI（可选） |
/// | image_host | 图床（可选） |
#[derive(Clone)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub notifier: Option<Arc<dyn OrderNotifier>>,
    pub ledger: Option<Arc<LedgerAppender>>,
    pub generator: Option<Arc<dyn TextGenerator>>,
    pub image_host: Option<Arc<ImageHostClient>>,
}

impl ServerState {
    /// 手动构造（测试里用替身协作方时走这里）
    pub fn new(
        config: Config,
        pool: SqlitePool,
        notifier: Option<Arc<dyn OrderNotifier>>,
        ledger: Option<Arc<LedgerAppender>>,
        generator: Option<Arc<dyn TextGenerator>>,
        image_host: Option<Arc<ImageHostClient>>,
    ) -> Self {
        Self {
            config,
            pool,
            notifier,
            ledger,
            generator,
            image_host,
        }
    }

    /// 初始化服务器状态：打开数据库、按凭据构造各协作方客户端
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let db = DbService::new(&config.database_path).await?;

        let notifier: Option<Arc<dyn OrderNotifier>> = match (
            config.line_channel_access_token.clone(),
            config.line_user_id.clone(),
        ) {
            (Some(token), Some(recipient)) => {
                Some(Arc::new(LineNotifier::new(token, recipient)))
            }
            _ => {
                tracing::warn!("LINE 凭据未配置，订单通知禁用");
                None
            }
        };

        let ledger = match (
            config.google_sheet_id.clone(),
            config.google_service_account_json.as_deref(),
        ) {
            (Some(sheet_id), Some(raw_key)) => {
                let key = ServiceAccountKey::from_json(raw_key)
                    .map_err(|e| AppError::internal(e.to_string()))?;
                let client = Arc::new(GoogleSheetsClient::new(sheet_id, key));
                Some(Arc::new(LedgerAppender::new(client)))
            }
            _ => {
                tracing::warn!("Google Sheets 凭据未配置，订单账本禁用");
                None
            }
        };

        let generator: Option<Arc<dyn TextGenerator>> = match config.gemini_api_key.clone() {
            Some(key) => Some(Arc::new(GeminiClient::new(key))),
            None => {
                tracing::warn!("Gemini API 凭据未配置，加购推荐禁用");
                None
            }
        };

        let image_host = match config.imgbb_api_key.clone() {
            Some(key) => Some(Arc::new(ImageHostClient::new(key))),
            None => {
                tracing::warn!("图床凭据未配置，图片上传禁用");
                None
            }
        };

        Ok(Self::new(
            config.clone(),
            db.pool,
            notifier,
            ledger,
            generator,
            image_host,
        ))
    }
}
