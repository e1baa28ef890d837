//! FarmCom Server - 农产品交易市场后端
//!
//! # 架构概述
//!
//! 本模块是 FarmCom 服务端的主入口，提供以下核心功能：
//!
//! - **认证** (`auth`): JWT + Argon2 认证体系
//! - **数据库** (`db`): 嵌入式 SurrealDB 存储 (用户/商品/订单)
//! - **HTTP API** (`api`): RESTful API 接口
//! - **外部协作** (`services`): CMS 页面内容代理、事件 webhook 通知
//!
//! # 模块结构
//!
//! ```text
//! farm-server/src/
//! ├── core/          # 配置、状态、服务器
//! ├── auth/          # JWT 认证、提取器、中间件
//! ├── api/           # HTTP 路由和处理器
//! ├── db/            # 数据库层 (模型 + 仓储)
//! ├── services/      # CMS 代理、webhook 通知
//! └── utils/         # 错误、日志、校验
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod services;
pub mod utils;

// Re-export 公共类型
pub use auth::{CurrentUser, JwtService};
pub use crate::core::{Config, Server, ServerState, setup_environment};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

pub fn print_banner() {
    println!(
        r#"
    ______                     ______
   / ____/___ __________ ___  / ____/___  ____ ___
  / /_  / __ `/ ___/ __ `__ \/ /   / __ \/ __ `__ \
 / __/ / /_/ / /  / / / / / / /___/ /_/ / / / / / /
/_/    \__,_/_/  /_/ /_/ /_/\____/\____/_/ /_/ /_/
    "#
    );
}
