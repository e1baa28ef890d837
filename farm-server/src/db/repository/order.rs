//! Order Repository
//!
//! Orders are created atomically as one document at checkout and later
//! mutated in place (delivered flag, rating). There is no cross-document
//! transaction with the catalog; a stale cart can reference deleted
//! products or outdated prices.

use super::{BaseRepository, RepoError, RepoResult, record_key};
use crate::db::models::{Order, OrderCreate, OrderRating};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const ORDER_TABLE: &str = "order";

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Persist a new order document
    pub async fn create(&self, data: OrderCreate) -> RepoResult<Order> {
        let created: Option<Order> = self.base.db().create(ORDER_TABLE).content(data).await?;
        created.ok_or_else(|| RepoError::Database("Order insert returned no record".to_string()))
    }

    /// Find order by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        let key = record_key(ORDER_TABLE, id);
        let order: Option<Order> = self.base.db().select((ORDER_TABLE, key)).await?;
        Ok(order)
    }

    /// All orders, newest first (admin view)
    pub async fn find_all(&self) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order ORDER BY createdAt DESC")
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Orders placed by the given buyer, newest first
    pub async fn find_by_customer(&self, customer_id: &str) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query("SELECT * FROM order WHERE customerId = $customer ORDER BY createdAt DESC")
            .bind(("customer", customer_id.to_string()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Orders whose line items contain the given seller, newest first
    pub async fn find_by_seller(&self, seller_id: &str) -> RepoResult<Vec<Order>> {
        let orders: Vec<Order> = self
            .base
            .db()
            .query(
                "SELECT * FROM order WHERE products.sellerId CONTAINS $seller \
                 ORDER BY createdAt DESC",
            )
            .bind(("seller", seller_id.to_string()))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Set the delivered flag and timestamp
    ///
    /// Fails with [`RepoError::NotFound`] if the order does not exist.
    pub async fn mark_delivered(&self, id: &str) -> RepoResult<Order> {
        let key = record_key(ORDER_TABLE, id);
        let updated: Option<Order> = self
            .base
            .db()
            .update((ORDER_TABLE, key))
            .merge(serde_json::json!({
                "isDelivered": true,
                "deliveredAt": chrono::Utc::now().to_rfc3339(),
            }))
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }

    /// Attach a rating to the order
    ///
    /// No delivered/buyer precondition; the mutations are independent.
    pub async fn set_rating(&self, id: &str, rating: OrderRating) -> RepoResult<Order> {
        let key = record_key(ORDER_TABLE, id);
        let updated: Option<Order> = self
            .base
            .db()
            .update((ORDER_TABLE, key))
            .merge(serde_json::json!({
                "rating": {
                    "value": rating.value,
                    "comment": rating.comment,
                },
            }))
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Order {} not found", id)))
    }
}
