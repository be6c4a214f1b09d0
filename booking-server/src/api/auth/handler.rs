//! Authentication Handlers
//!
//! Handles register, login, logout, and current-user lookup

use std::time::Duration;

use axum::{Extension, Json, extract::State};
use shared::{LoginRequest, LoginResponse, RegisterRequest, User};

use crate::AppError;
use crate::auth::CurrentUser;
use crate::core::ServerState;

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// POST /api/auth/register - 注册并自动登录
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user = state.users.register(&req)?;

    let token = state
        .get_jwt_service()
        .generate_token(&user)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(user_id = %user.id, email = %user.email, "User registered");

    Ok(Json(LoginResponse { token, user }))
}

/// POST /api/auth/login - 登录
///
/// Authenticates user credentials and returns a JWT token
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let result = state.users.verify_login(&req.email, &req.password);

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let user = match result {
        Ok(user) => user,
        Err(e) => {
            tracing::warn!(email = %req.email, "Login failed");
            return Err(e);
        }
    };

    let token = state
        .get_jwt_service()
        .generate_token(&user)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(
        user_id = %user.id,
        email = %user.email,
        role = %user.role,
        "User logged in successfully"
    );

    Ok(Json(LoginResponse { token, user }))
}

/// GET /api/auth/me - 当前用户信息
///
/// 令牌可能早于资料变更签发，因此从用户存储读取最新快照。
pub async fn me(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<User>, AppError> {
    let user = state
        .users
        .get(&user.id)
        .ok_or_else(|| AppError::not_found(format!("User {} not found", user.id)))?;
    Ok(Json(user))
}

/// POST /api/auth/logout - 登出
///
/// 令牌是无状态的；登出只做审计日志，客户端负责丢弃令牌。
pub async fn logout(
    Extension(user): Extension<CurrentUser>,
) -> Result<Json<()>, AppError> {
    tracing::info!(
        user_id = %user.id,
        email = %user.email,
        "User logged out"
    );

    Ok(Json(()))
}
