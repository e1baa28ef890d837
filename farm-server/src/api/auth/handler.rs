//! Authentication Handlers
//!
//! Handles signup and login

use std::time::Duration;

use axum::{Json, extract::State, http::StatusCode};

use crate::core::ServerState;
use crate::db::models::{Role, UserCreate};
use crate::db::repository::UserRepository;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_PASSWORD_LEN, validate_required_text,
};
use crate::utils::{AppError, AppResult};

// Re-use shared DTOs for API consistency
use shared::client::{AuthResponse, LoginRequest, SignupRequest};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// POST /api/auth/signup - 注册
///
/// 重复邮箱返回 409 Conflict，不会创建第二条记录。
/// 成功返回 201 {token, user} 并触发注册 webhook (尽力而为)。
pub async fn signup(
    State(state): State<ServerState>,
    Json(req): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    validate_required_text(&req.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&req.email, "email", MAX_EMAIL_LEN)?;
    validate_required_text(&req.password, "password", MAX_PASSWORD_LEN)?;

    let role = match &req.role {
        Some(r) => r
            .parse::<Role>()
            .map_err(|e| AppError::validation(format!("Invalid role: {}", e)))?,
        None => Role::default(), // buyer
    };

    let repo = UserRepository::new(state.db.clone());
    let user = repo
        .create(UserCreate {
            name: req.name,
            email: req.email,
            password: req.password,
            role,
        })
        .await?;

    let user_id = user.id.as_ref().map(|t| t.to_string()).unwrap_or_default();
    let token = state
        .jwt_service
        .generate_token(&user_id, &user.name, &user.email, user.role.as_str())
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    // 注册事件通知 (非阻塞)
    state
        .automate
        .notify_signup(&user.name, &user.email, user.role.as_str());

    tracing::info!(user_id = %user_id, email = %user.email, role = %user.role, "User signed up");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.public_view(),
        }),
    ))
}

/// POST /api/auth/login - 登录
///
/// | 结果 | HTTP 状态码 |
/// |------|------------|
/// | 邮箱不存在 | 404 NotFound |
/// | 密码错误 | 401 Unauthorized |
/// | 成功 | 200 {token, user} |
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let repo = UserRepository::new(state.db.clone());
    let user = repo.find_by_email(&req.email).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let user = match user {
        Some(u) => u,
        None => {
            tracing::warn!(email = %req.email, "Login failed - user not found");
            return Err(AppError::not_found("User not found"));
        }
    };

    let password_valid = user
        .verify_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

    if !password_valid {
        tracing::warn!(email = %req.email, "Login failed - invalid credentials");
        return Err(AppError::invalid_credentials());
    }

    let user_id = user.id.as_ref().map(|t| t.to_string()).unwrap_or_default();
    let token = state
        .jwt_service
        .generate_token(&user_id, &user.name, &user.email, user.role.as_str())
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    // 登录事件通知 (非阻塞)
    state
        .automate
        .notify_login(&user.name, &user.email, user.role.as_str());

    tracing::info!(user_id = %user_id, email = %user.email, "User logged in");

    Ok(Json(AuthResponse {
        token,
        user: user.public_view(),
    }))
}
