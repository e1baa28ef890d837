//! Order API Handlers
//!
//! 下单、查询、送达标记、评分。下单是唯一的公共写接口：购物车快照
//! 由客户端提交，金额与行项目不做服务端重算 (已知缺口，见测试)。

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{
    DEFAULT_PAYMENT_METHOD, LineItem, Order, OrderCreate, OrderRating, STATUS_PENDING,
    ShippingDetails,
};
use crate::db::repository::OrderRepository;
use crate::utils::validation::{MAX_COMMENT_LEN, validate_optional_text, validate_rating_value};
use crate::utils::{AppError, AppResult};

use shared::client::MessageResponse;
use shared::orders::{OrderCreateRequest, RateRequest};

/// POST /api/orders - 创建订单
///
/// 以 Pending 状态一次性落库，然后触发下单 webhook (非阻塞)。
pub async fn create(
    State(state): State<ServerState>,
    Json(req): Json<OrderCreateRequest>,
) -> AppResult<(StatusCode, Json<Order>)> {
    if req.customer_id.trim().is_empty() {
        return Err(AppError::validation("customerId must not be empty"));
    }

    let products: Vec<LineItem> = req
        .products
        .into_iter()
        .map(|item| LineItem {
            product_id: item.product_id,
            seller_id: item.seller_id,
            name: item.name,
            price: item.price,
            quantity: item.quantity,
        })
        .collect();

    let order = OrderCreate {
        customer_id: req.customer_id,
        customer_name: req.customer_name,
        customer_email: req.customer_email,
        products,
        // Submitted by the client; stored as-is
        total_amount: req.total_amount,
        shipping_details: ShippingDetails {
            address: req.shipping_details.address,
            city: req.shipping_details.city,
            state: req.shipping_details.state,
            pincode: req.shipping_details.pincode,
        },
        payment_method: req
            .payment_method
            .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string()),
        status: STATUS_PENDING.to_string(),
        is_delivered: false,
        created_at: chrono::Utc::now().to_rfc3339(),
    };

    let repo = OrderRepository::new(state.db.clone());
    let order = repo.create(order).await?;

    // 下单事件通知 (非阻塞)
    state.automate.notify_order(&order);

    let id = order.id.as_ref().map(|t| t.to_string()).unwrap_or_default();
    tracing::info!(order_id = %id, customer_id = %order.customer_id, total = order.total_amount, "Order created");

    Ok((StatusCode::CREATED, Json(order)))
}

/// GET /api/orders - 当前买家的订单 (管理员可见全部)
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Order>>> {
    let repo = OrderRepository::new(state.db.clone());
    let orders = if user.is_admin() {
        repo.find_all().await?
    } else {
        repo.find_by_customer(&user.id).await?
    };
    Ok(Json(orders))
}

/// GET /api/orders/seller - 含当前卖家商品的订单
///
/// 仅卖家角色可用；sellerId 取自已验证令牌。
pub async fn list_for_seller(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Order>>> {
    if !user.is_seller() {
        return Err(AppError::forbidden("Only sellers allowed"));
    }

    let repo = OrderRepository::new(state.db.clone());
    let orders = repo.find_by_seller(&user.id).await?;
    Ok(Json(orders))
}

/// PATCH /api/orders/{id}/deliver - 标记送达
///
/// 设置送达标志与时间戳；订单不存在返回 404。
pub async fn deliver(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let repo = OrderRepository::new(state.db.clone());
    repo.mark_delivered(&id).await?;

    tracing::info!(order_id = %id, "Order marked as delivered");

    Ok(Json(MessageResponse {
        message: "Order marked as delivered".to_string(),
    }))
}

/// PATCH /api/orders/{id}/rate - 评分
///
/// value 必须是 1..=5 的数字，否则 400；没有 "必须已送达" 的前置条件。
pub async fn rate(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<RateRequest>,
) -> AppResult<Json<MessageResponse>> {
    validate_rating_value(req.value)?;
    validate_optional_text(&req.comment, "comment", MAX_COMMENT_LEN)?;

    let repo = OrderRepository::new(state.db.clone());
    repo.set_rating(
        &id,
        OrderRating {
            value: req.value,
            comment: req.comment,
        },
    )
    .await?;

    tracing::info!(order_id = %id, value = req.value, "Order rated");

    Ok(Json(MessageResponse {
        message: "Rating updated".to_string(),
    }))
}
