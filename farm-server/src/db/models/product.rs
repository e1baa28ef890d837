//! Product Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Product ID type
pub type ProductId = RecordId;

/// Product listing
///
/// `seller_id` is captured as a plain string so orders can snapshot it
/// without a record link. `average_rating`/`rating_count` are aggregate
/// fields carried on the document; nothing in scope recomputes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<ProductId>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub price: f64,
    /// May be empty; listings never fail for a missing image
    #[serde(default)]
    pub image_url: String,
    pub seller_id: String,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub rating_count: i64,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub image_url: String,
}
