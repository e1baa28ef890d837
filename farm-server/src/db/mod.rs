//! Database Module
//!
//! Embedded SurrealDB (RocksDB engine). The handle is opened once at process
//! start by [`crate::core::ServerState::initialize`] and cloned per request.
//! The engine provides single-document atomic writes and nothing more; there
//! are no cross-document transactions anywhere in this codebase.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use std::path::Path;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

const NAMESPACE: &str = "farmcom";
const DATABASE: &str = "marketplace";

/// Open the embedded database and apply the schema definitions
pub async fn open(data_dir: &Path) -> Result<Surreal<Db>, AppError> {
    let db: Surreal<Db> = Surreal::new::<RocksDb>(data_dir)
        .await
        .map_err(|e| AppError::database(format!("Failed to open database: {}", e)))?;

    db.use_ns(NAMESPACE)
        .use_db(DATABASE)
        .await
        .map_err(|e| AppError::database(format!("Failed to select namespace: {}", e)))?;

    define_schema(&db).await?;

    tracing::info!(path = %data_dir.display(), "Database opened (embedded SurrealDB)");

    Ok(db)
}

/// Table and index definitions
///
/// Tables are schemaless documents; the unique index on user.email is the
/// one store-level constraint (duplicate signups must not create a second
/// record even if two requests race past the handler-level check).
async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
    db.query("DEFINE TABLE IF NOT EXISTS user SCHEMALESS")
        .query("DEFINE TABLE IF NOT EXISTS product SCHEMALESS")
        .query("DEFINE TABLE IF NOT EXISTS order SCHEMALESS")
        .query("DEFINE INDEX IF NOT EXISTS user_email ON user FIELDS email UNIQUE")
        .query("DEFINE INDEX IF NOT EXISTS product_seller ON product FIELDS sellerId")
        .query("DEFINE INDEX IF NOT EXISTS order_customer ON order FIELDS customerId")
        .await
        .map_err(|e| AppError::database(format!("Failed to define schema: {}", e)))?
        .check()
        .map_err(|e| AppError::database(format!("Schema definition rejected: {}", e)))?;
    Ok(())
}
