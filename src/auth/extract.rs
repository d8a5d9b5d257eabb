//! Request extractors for authenticated routes

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};

use crate::db::{User, UserRepository};
use crate::error::AppError;
use crate::state::AppState;

/// Pull the token out of an `Authorization: Bearer <token>` header.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

async fn resolve_user(state: &AppState, token: &str) -> Result<Option<User>, AppError> {
    let Some(session) = state.sessions().resolve(token).await else {
        return Ok(None);
    };

    let user = UserRepository::new(state.db()).get(&session.user_id).await?;
    Ok(user)
}

/// Extractor for routes that require a logged-in user.
pub struct AuthUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| AppError::Unauthorized("Missing bearer token".to_string()))?;

        let user = resolve_user(state, token)
            .await?
            .ok_or_else(|| AppError::Unauthorized("Invalid or expired session".to_string()))?;

        Ok(AuthUser(user))
    }
}

/// Extractor for routes that serve both anonymous and logged-in users.
pub struct MaybeAuthUser(pub Option<User>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let Some(token) = bearer_token(&parts.headers) else {
            return Ok(MaybeAuthUser(None));
        };

        // A presented token must still be valid; a stale token on an
        // anonymous-friendly route degrades to anonymous.
        Ok(MaybeAuthUser(resolve_user(state, token).await?))
    }
}
