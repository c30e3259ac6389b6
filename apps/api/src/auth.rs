//! Caller identity. Sign-in happens in front of this service; the auth proxy
//! forwards the verified email in `x-user-email`.

use async_trait::async_trait;
use axum::{extract::FromRequestParts, http::request::Parts};

use crate::errors::AppError;

pub const USER_EMAIL_HEADER: &str = "x-user-email";

/// The signed-in user's email, normalized to lowercase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserEmail(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for UserEmail
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let email = parts
            .headers
            .get(USER_EMAIL_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim().to_lowercase())
            .filter(|v| !v.is_empty())
            .ok_or(AppError::Unauthorized)?;

        Ok(UserEmail(email))
    }
}
