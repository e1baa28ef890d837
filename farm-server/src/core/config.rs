use crate::auth::JwtConfig;

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | /var/lib/farmcom | 工作目录 (数据库、上传、日志) |
/// | HTTP_PORT | 3000 | HTTP 服务端口 |
/// | ENVIRONMENT | development | 运行环境 |
/// | CONTENT_API_URL | (未设置) | 无头 CMS 地址 |
/// | CONTENT_API_KEY | (未设置) | CMS 访问密钥 |
/// | AUTOMATE_USER_EVENT_URL | (未设置) | 登录/注册事件 webhook |
/// | AUTOMATE_ORDER_EVENT_URL | (未设置) | 下单事件 webhook |
///
/// # 示例
///
/// ```ignore
/// WORK_DIR=/data/farmcom HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、上传图片、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 无头 CMS 地址 (未设置则使用内置页面文案)
    pub content_api_url: Option<String>,
    /// CMS 访问密钥
    pub content_api_key: Option<String>,
    /// 登录/注册事件 webhook 地址
    pub automate_user_event_url: Option<String>,
    /// 下单事件 webhook 地址
    pub automate_order_event_url: Option<String>,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/farmcom".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            content_api_url: std::env::var("CONTENT_API_URL").ok(),
            content_api_key: std::env::var("CONTENT_API_KEY").ok(),
            automate_user_event_url: std::env::var("AUTOMATE_USER_EVENT_URL").ok(),
            automate_order_event_url: std::env::var("AUTOMATE_ORDER_EVENT_URL").ok(),
        }
    }

    /// 使用自定义值覆盖部分配置
    ///
    /// 常用于测试场景
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// 设置进程环境 (dotenv + 日志)
///
/// 在加载配置之前调用
pub fn setup_environment() {
    dotenv::dotenv().ok();

    let log_dir = std::env::var("LOG_DIR").ok();
    let log_level = std::env::var("LOG_LEVEL").ok();
    crate::utils::logger::init_logger_with_file(log_level.as_deref(), log_dir.as_deref());
}
