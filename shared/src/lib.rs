//! Shared types for FarmCom
//!
//! Wire DTOs used in API communication. These types are shared between
//! farm-server and its consumers (integration tests, future clients).

pub mod client;
pub mod orders;
pub mod pages;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use client::{AuthResponse, LoginRequest, MessageResponse, SignupRequest, UserInfo};
pub use orders::{OrderCreateRequest, RateRequest};
pub use pages::PageContent;
