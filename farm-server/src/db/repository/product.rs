//! Product Repository

use super::{BaseRepository, RepoResult, record_key};
use crate::db::models::{Product, ProductCreate};
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const PRODUCT_TABLE: &str = "product";

#[derive(Clone)]
pub struct ProductRepository {
    base: BaseRepository,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProductSeed {
    name: String,
    description: String,
    category: String,
    price: f64,
    image_url: String,
    seller_id: String,
    average_rating: f64,
    rating_count: i64,
    created_at: String,
}

impl ProductRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all products, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product ORDER BY createdAt DESC")
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Find products owned by the given seller, newest first
    pub async fn find_by_seller(&self, seller_id: &str) -> RepoResult<Vec<Product>> {
        let products: Vec<Product> = self
            .base
            .db()
            .query("SELECT * FROM product WHERE sellerId = $seller ORDER BY createdAt DESC")
            .bind(("seller", seller_id.to_string()))
            .await?
            .take(0)?;
        Ok(products)
    }

    /// Find product by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Product>> {
        let key = record_key(PRODUCT_TABLE, id);
        let product: Option<Product> = self.base.db().select((PRODUCT_TABLE, key)).await?;
        Ok(product)
    }

    /// Create a new product owned by `seller_id`
    pub async fn create(&self, data: ProductCreate, seller_id: &str) -> RepoResult<Product> {
        let seed = ProductSeed {
            name: data.name,
            description: data.description,
            category: data.category,
            price: data.price,
            image_url: data.image_url,
            seller_id: seller_id.to_string(),
            average_rating: 0.0,
            rating_count: 0,
            created_at: chrono::Utc::now().to_rfc3339(),
        };

        let created: Option<Product> = self.base.db().create(PRODUCT_TABLE).content(seed).await?;
        created.ok_or_else(|| {
            super::RepoError::Database("Product insert returned no record".to_string())
        })
    }

    /// Delete a product by id
    ///
    /// Idempotent: returns `false` when no record matched, never an error.
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let key = record_key(PRODUCT_TABLE, id);
        let deleted: Option<Product> = self.base.db().delete((PRODUCT_TABLE, key)).await?;
        Ok(deleted.is_some())
    }
}
