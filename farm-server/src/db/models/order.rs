//! Order Model
//!
//! 订单在结账时作为单个文档一次性创建，行项目是购物车快照。
//! 状态是自由字符串 (默认 "Pending")，送达与评分是相互独立的字段变更，
//! 没有状态机约束。

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Order ID type
pub type OrderId = RecordId;

/// Default order status at creation time
pub const STATUS_PENDING: &str = "Pending";

/// Default payment method when the client omits one
pub const DEFAULT_PAYMENT_METHOD: &str = "COD";

/// One product entry within an order: a snapshot of product id, seller id,
/// name, price and quantity at order time
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: String,
    pub seller_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

/// Shipping details captured at checkout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShippingDetails {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub pincode: String,
}

/// Buyer rating attached to an order (value 1..=5 plus optional comment)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRating {
    pub value: f64,
    #[serde(default)]
    pub comment: Option<String>,
}

/// Order document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<OrderId>,
    pub customer_id: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: String,
    pub products: Vec<LineItem>,
    /// Submitted by the client at checkout; stored as-is
    pub total_amount: f64,
    #[serde(default)]
    pub shipping_details: ShippingDetails,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub is_delivered: bool,
    #[serde(default)]
    pub delivered_at: Option<String>,
    #[serde(default)]
    pub rating: Option<OrderRating>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Create order payload (built by the handler from the checkout request)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub customer_id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub products: Vec<LineItem>,
    pub total_amount: f64,
    pub shipping_details: ShippingDetails,
    pub payment_method: String,
    pub status: String,
    pub is_delivered: bool,
    pub created_at: String,
}
