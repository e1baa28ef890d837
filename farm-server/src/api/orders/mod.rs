//! Order API 模块

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", order_routes())
}

fn order_routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/seller", get(handler::list_for_seller))
        .route("/{id}/deliver", patch(handler::deliver))
        .route("/{id}/rate", patch(handler::rate))
}
