//! 外部协作服务
//!
//! - [`content`] - 无头 CMS 页面内容代理 (只读，带内置兜底)
//! - [`automate`] - 登录/注册/下单事件 webhook 通知 (尽力而为，不阻塞)

pub mod automate;
pub mod content;

pub use automate::AutomateService;
pub use content::ContentService;
