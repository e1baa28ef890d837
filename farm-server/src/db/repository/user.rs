//! User Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{User, UserCreate};
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const USER_TABLE: &str = "user";

#[derive(Clone)]
pub struct UserRepository {
    base: BaseRepository,
}

/// Stored document shape for a new user (id assigned by the database)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UserSeed {
    name: String,
    email: String,
    password_hash: String,
    role: String,
    created_at: String,
}

impl UserRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find a user by email (unique)
    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;
        let user: Option<User> = result.take(0)?;
        Ok(user)
    }

    /// Create a new user
    ///
    /// Fails with [`RepoError::Duplicate`] if the email is already taken.
    /// The plaintext password is hashed here; it never reaches the store.
    pub async fn create(&self, data: UserCreate) -> RepoResult<User> {
        if self.find_by_email(&data.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "User with email {} already exists",
                data.email
            )));
        }

        let password_hash = User::hash_password(&data.password)
            .map_err(|e| RepoError::Validation(format!("Failed to hash password: {}", e)))?;

        let seed = UserSeed {
            name: data.name,
            email: data.email,
            password_hash,
            role: data.role.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
        };

        // The unique index on user.email backstops the pre-insert check
        let created: Option<User> = self.base.db().create(USER_TABLE).content(seed).await?;
        created.ok_or_else(|| RepoError::Database("User insert returned no record".to_string()))
    }

    /// Count users with the given email (used by conformance tests)
    pub async fn count_by_email(&self, email: &str) -> RepoResult<usize> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM user WHERE email = $email")
            .bind(("email", email.to_string()))
            .await?;
        let users: Vec<User> = result.take(0)?;
        Ok(users.len())
    }
}
