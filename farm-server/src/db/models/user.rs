//! User Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::client::UserInfo;
use surrealdb::RecordId;

/// User ID type
pub type UserId = RecordId;

/// User role
///
/// buyer 可浏览、加购、下单；seller 可上架/下架商品并管理含自己商品的订单；
/// admin 拥有全部权限。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Buyer,
    Seller,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Buyer => "buyer",
            Role::Seller => "seller",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buyer" => Ok(Role::Buyer),
            "seller" => Ok(Role::Seller),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role: {}", other)),
        }
    }
}

/// User model matching the `user` table
///
/// The password is stored only as an argon2 salted hash and is never
/// serialized back out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<UserId>,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing)]
    pub password_hash: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Create user payload (signup)
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub name: String,
    pub email: String,
    /// Plaintext; hashed by the repository before storage
    pub password: String,
    pub role: Role,
}

impl User {
    /// Verify password using argon2
    pub fn verify_password(&self, password: &str) -> Result<bool, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHash, PasswordVerifier},
        };

        let parsed_hash = PasswordHash::new(&self.password_hash)?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Hash password using argon2 (per-user random salt)
    pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
        use argon2::{
            Argon2,
            password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
        };

        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();
        let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
        Ok(password_hash.to_string())
    }

    /// Public view returned by the auth endpoints
    pub fn public_view(&self) -> UserInfo {
        UserInfo {
            id: self.id.as_ref().map(|t| t.to_string()).unwrap_or_default(),
            name: self.name.clone(),
            email: self.email.clone(),
            role: self.role.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_roundtrip() {
        let hash = User::hash_password("hunter2-but-longer").expect("hash");
        let user = User {
            id: None,
            name: "Asha".to_string(),
            email: "asha@example.com".to_string(),
            password_hash: hash,
            role: Role::Buyer,
            created_at: None,
        };

        assert!(user.verify_password("hunter2-but-longer").unwrap());
        assert!(!user.verify_password("wrong-password").unwrap());
    }

    #[test]
    fn salts_are_per_user() {
        let a = User::hash_password("same-password").unwrap();
        let b = User::hash_password("same-password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn role_parses_and_defaults() {
        assert_eq!("seller".parse::<Role>().unwrap(), Role::Seller);
        assert!("superuser".parse::<Role>().is_err());
        assert_eq!(Role::default(), Role::Buyer);
    }
}
