//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 注册/登录接口
//! - [`pages`] - CMS 页面内容接口
//! - [`upload`] - 图片上传接口
//! - [`products`] - 商品管理接口
//! - [`orders`] - 订单管理接口

pub mod auth;
pub mod health;
pub mod pages;
pub mod upload;

// Data models API
pub mod orders;
pub mod products;

// Re-export common types for handlers
pub use crate::utils::{AppError, AppResult};
