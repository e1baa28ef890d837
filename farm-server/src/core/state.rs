use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::services::{AutomateService, ContentService};
use crate::utils::AppError;

/// 服务器状态 - 持有所有服务的单例引用
///
/// ServerState 是整个进程的核心数据结构，在启动时初始化一次，
/// 之后以浅拷贝 (Arc/句柄 clone) 的形式注入每个请求。
///
/// # 服务组件
///
/// | 字段 | 类型 | 说明 |
/// |------|------|------|
/// | config | Config | 配置项 (不可变) |
/// | db | Surreal<Db> | 嵌入式数据库 (启动时显式打开) |
/// | jwt_service | Arc<JwtService> | JWT 认证服务 |
/// | content | ContentService | CMS 页面内容代理 |
/// | automate | AutomateService | 事件 webhook 通知 |
#[derive(Clone, Debug)]
pub struct ServerState {
    /// 服务器配置
    pub config: Config,
    /// 嵌入式数据库 (SurrealDB)
    pub db: Surreal<Db>,
    /// JWT 认证服务 (Arc 共享所有权)
    pub jwt_service: Arc<JwtService>,
    /// CMS 页面内容代理
    pub content: ContentService,
    /// 事件 webhook 通知
    pub automate: AutomateService,
    /// 进程启动时间 (用于健康检查)
    pub started_at: Instant,
}

impl ServerState {
    /// 初始化服务器状态
    ///
    /// 创建工作目录、打开数据库、构建各服务。数据库连接在这里显式
    /// 建立一次，没有模块级的 "已连接" 标志位。
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let work_dir = PathBuf::from(&config.work_dir);
        for sub in ["data", "uploads", "logs"] {
            std::fs::create_dir_all(work_dir.join(sub)).map_err(|e| {
                AppError::internal(format!(
                    "Failed to create work dir {}: {}",
                    work_dir.join(sub).display(),
                    e
                ))
            })?;
        }

        let db = crate::db::open(&work_dir.join("data")).await?;

        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        let content = ContentService::new(
            config.content_api_url.clone(),
            config.content_api_key.clone(),
        );
        let automate = AutomateService::new(
            config.automate_user_event_url.clone(),
            config.automate_order_event_url.clone(),
        );

        Ok(Self {
            config: config.clone(),
            db,
            jwt_service,
            content,
            automate,
            started_at: Instant::now(),
        })
    }

    /// 工作目录
    pub fn work_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.work_dir)
    }

    /// 上传图片目录
    pub fn uploads_dir(&self) -> PathBuf {
        self.work_dir().join("uploads")
    }
}
