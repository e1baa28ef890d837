//! Database Models
//!
//! Document shapes stored in SurrealDB. Wire field names are camelCase to
//! match the public API (`imageUrl`, `sellerId`, `totalAmount`, …); the same
//! structs are used for storage and for JSON responses.

pub mod order;
pub mod product;
pub mod serde_helpers;
pub mod user;

pub use order::{
    DEFAULT_PAYMENT_METHOD, LineItem, Order, OrderCreate, OrderId, OrderRating, STATUS_PENDING,
    ShippingDetails,
};
pub use product::{Product, ProductCreate, ProductId};
pub use user::{Role, User, UserCreate, UserId};
