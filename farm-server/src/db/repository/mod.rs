//! Repository Module
//!
//! Provides CRUD operations for the SurrealDB tables.

pub mod order;
pub mod product;
pub mod user;

// Re-exports
pub use order::OrderRepository;
pub use product::ProductRepository;
pub use user::UserRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for crate::utils::AppError {
    fn from(err: RepoError) -> Self {
        use crate::utils::AppError;
        match err {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Conflict(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

// =============================================================================
// ID Convention: API 全程使用 "table:id" 字符串格式
// =============================================================================
//
// 路径参数既可以是完整形式 ("order:abc") 也可以是纯 key ("abc")；
// record_key 负责剥掉表前缀后交给 SDK 的 (table, key) 形式。

/// Strip the `table:` prefix from an id, if present
pub(crate) fn record_key<'a>(table: &str, id: &'a str) -> &'a str {
    id.strip_prefix(table)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(id)
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_key_strips_table_prefix() {
        assert_eq!(record_key("order", "order:abc123"), "abc123");
        assert_eq!(record_key("order", "abc123"), "abc123");
        // Foreign prefixes are left alone
        assert_eq!(record_key("order", "product:abc123"), "product:abc123");
    }
}
