//! Order API DTOs
//!
//! Checkout payloads submitted by the client application. Line items are a
//! snapshot of the cart at checkout time: product id, seller id, name, price
//! and quantity are captured as-is and not re-validated against the catalog.

use serde::{Deserialize, Serialize};

/// One product entry within a checkout payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemRequest {
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
pub struct ShippingDetailsRequest {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub pincode: String,
}

/// Checkout request; creates one order document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreateRequest {
    pub customer_id: String,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub customer_email: String,
    pub products: Vec<LineItemRequest>,
    /// Submitted by the client; the server stores it as-is
    pub total_amount: f64,
    #[serde(default)]
    pub shipping_details: ShippingDetailsRequest,
    #[serde(default)]
    pub payment_method: Option<String>,
}

/// Rate-order request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateRequest {
    pub value: f64,
    #[serde(default)]
    pub comment: Option<String>,
}
