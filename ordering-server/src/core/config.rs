/// 服务器配置 — 全部来自环境变量
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | HTTP_PORT | 8080 | HTTP 服务端口 |
/// | DATABASE_PATH | ordering.db | SQLite 数据库文件 |
/// | ADMIN_PASSWORD | (未设) | 管理端共享密码 |
/// | LINE_CHANNEL_ACCESS_TOKEN | (未设) | LINE 推送凭据 |
/// | LINE_USER_ID | (未设) | LINE 通知接收者 |
/// | GOOGLE_SHEET_ID | (未设) | 账本试算表 ID |
/// | GOOGLE_SERVICE_ACCOUNT_JSON | (未设) | 服务账号密钥 JSON |
/// | GEMINI_API_KEY | (未设) | 生成式 AI 凭据 |
/// | IMGBB_API_KEY | (未设) | 图床凭据 |
/// | LOG_LEVEL | info | 日志级别 |
///
/// 协作方凭据缺失时该协作方整体禁用，服务器照常启动。
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API 服务端口
    pub http_port: u16,
    /// SQLite 数据库文件路径
    pub database_path: String,
    /// 管理端共享密码
    pub admin_password: Option<String>,
    /// LINE Messaging API 凭据
    pub line_channel_access_token: Option<String>,
    /// LINE 通知接收者 ID
    pub line_user_id: Option<String>,
    /// 账本试算表 ID
    pub google_sheet_id: Option<String>,
    /// Google 服务账号密钥 (JSON 字符串)
    pub google_service_account_json: Option<String>,
    /// Gemini API 凭据
    pub gemini_api_key: Option<String>,
    /// imgbb 图床凭据
    pub imgbb_api_key: Option<String>,
    /// 日志级别
    pub log_level: String,
}

fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// 从环境变量加载配置，未设置的项使用默认值
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "ordering.db".into()),
            admin_password: env_opt("ADMIN_PASSWORD"),
            line_channel_access_token: env_opt("LINE_CHANNEL_ACCESS_TOKEN"),
            line_user_id: env_opt("LINE_USER_ID"),
            google_sheet_id: env_opt("GOOGLE_SHEET_ID"),
            google_service_account_json: env_opt("GOOGLE_SERVICE_ACCOUNT_JSON"),
            gemini_api_key: env_opt("GEMINI_API_KEY"),
            imgbb_api_key: env_opt("IMGBB_API_KEY"),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
