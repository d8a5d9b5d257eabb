//! Registration, login, and session routes

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::auth::{bearer_token, hash_password, verify_password, AuthUser};
use crate::db::{User, UserRepository};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Create the auth router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// POST /api/v1/auth/register
async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<User>)> {
    let username = request.username.trim();
    let email = request.email.trim();

    if username.is_empty() || email.is_empty() || request.password.is_empty() {
        return Err(AppError::BadRequest("All fields are required.".to_string()));
    }
    if request.password != request.confirm_password {
        return Err(AppError::BadRequest("Passwords do not match.".to_string()));
    }

    let repo = UserRepository::new(state.db());

    if repo.find_by_username(username).await?.is_some() {
        return Err(AppError::Conflict("Username already taken.".to_string()));
    }
    if repo.find_by_email(email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered.".to_string()));
    }

    let password_hash = hash_password(&request.password);
    let user = repo.create(username, email, &password_hash).await?;

    tracing::info!(username = %user.username, "Account created");

    Ok((StatusCode::CREATED, Json(user)))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub identifier: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: chrono::DateTime<chrono::Utc>,
    pub user: User,
}

/// POST /api/v1/auth/login
///
/// The identifier may be a username or an email address. Unknown users
/// and wrong passwords are indistinguishable to the caller.
async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let identifier = request.identifier.trim();

    let user = UserRepository::new(state.db())
        .find_by_identifier(identifier)
        .await?;

    let user = match user {
        Some(user) if verify_password(&user.password_hash, &request.password) => user,
        _ => return Err(AppError::Unauthorized("Invalid credentials.".to_string())),
    };

    let session = state.sessions().create(&user.id).await;

    tracing::info!(username = %user.username, "Login");

    Ok(Json(LoginResponse {
        token: session.token,
        expires_at: session.expires_at,
        user,
    }))
}

/// POST /api/v1/auth/logout
async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Result<StatusCode> {
    let token = bearer_token(&headers)
        .ok_or_else(|| AppError::Unauthorized("Missing bearer token".to_string()))?;

    if state.sessions().revoke(token).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Unauthorized(
            "Invalid or expired session".to_string(),
        ))
    }
}

/// GET /api/v1/auth/me
async fn me(AuthUser(user): AuthUser) -> Json<User> {
    Json(user)
}
