//! Page Content Routes
//!
//! 公共路由：每个页面的文案/布局配置，来自无头 CMS (带内置兜底)。

use axum::{
    Json,
    Router,
    extract::{Path, State},
    routing::get,
};
use shared::pages::PageContent;

use crate::core::ServerState;

/// GET /api/pages/{slug} - 页面内容
async fn get_page(State(state): State<ServerState>, Path(slug): Path<String>) -> Json<PageContent> {
    Json(state.content.get_page(&slug).await)
}

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/pages/{slug}", get(get_page))
}
