//! 核心模块 - 配置、状态、服务器

pub mod config;
pub mod server;
pub mod state;

pub use config::{Config, setup_environment};
pub use server::{Server, build_app, build_router};
pub use state::ServerState;
