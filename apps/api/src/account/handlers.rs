use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::account::summary::{favorite_platform, UserSummary, RECENT_LIMIT};
use crate::analytics::AnalyticsEvent;
use crate::auth::UserEmail;
use crate::errors::AppError;
use crate::models::user::UserRecord;
use crate::state::AppState;
use crate::store::SignIn;

#[derive(Debug, Deserialize)]
pub struct SignInRequest {
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SignInResponse {
    pub created: bool,
}

/// POST /api/v1/users
///
/// Called by the auth proxy after a successful sign-in. Creates the user row on
/// first sign-in.
pub async fn handle_sign_in(
    State(state): State<AppState>,
    UserEmail(email): UserEmail,
    payload: Result<Json<SignInRequest>, JsonRejection>,
) -> Result<Json<SignInResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    let outcome = state
        .store
        .upsert_user(&email, request.name.as_deref())
        .await?;

    let created = outcome == SignIn::Created;
    state.events.record(if created {
        AnalyticsEvent::SignUp { email }
    } else {
        AnalyticsEvent::Login { email }
    });

    Ok(Json(SignInResponse { created }))
}

/// GET /api/v1/me
pub async fn handle_get_me(
    State(state): State<AppState>,
    UserEmail(email): UserEmail,
) -> Result<Json<UserSummary>, AppError> {
    let user = state
        .store
        .get_user(&email)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {email} not found")))?;

    let generations = state.store.list_generations(&email, None).await?;
    let favorite = favorite_platform(&generations);
    let total_generations = generations.len();
    let recent = generations
        .into_iter()
        .take(RECENT_LIMIT as usize)
        .collect();

    Ok(Json(UserSummary {
        email: user.email,
        name: user.name,
        generation_count: user.generation_count,
        total_generations,
        favorite_platform: favorite,
        recent,
    }))
}

#[derive(Debug, Deserialize)]
pub struct UpdateNameRequest {
    #[serde(default)]
    pub name: String,
}

/// PATCH /api/v1/me
///
/// Renames the caller. The name is trimmed and must not be empty.
pub async fn handle_update_me(
    State(state): State<AppState>,
    UserEmail(email): UserEmail,
    payload: Result<Json<UpdateNameRequest>, JsonRejection>,
) -> Result<Json<UserRecord>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    let name = request.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Name cannot be empty".to_string()));
    }

    let user = state
        .store
        .update_user_name(&email, name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {email} not found")))?;

    info!("Updated name for {}", email);
    Ok(Json(user))
}

/// DELETE /api/v1/me
///
/// Removes every generation and the user row.
pub async fn handle_delete_me(
    State(state): State<AppState>,
    UserEmail(email): UserEmail,
) -> Result<StatusCode, AppError> {
    let removed = state.store.delete_user(&email).await?;
    info!("Deleted account {} ({} generations)", email, removed);

    state.events.record(AnalyticsEvent::AccountDeleted { email });

    Ok(StatusCode::NO_CONTENT)
}
