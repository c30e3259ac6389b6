use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::analytics::AnalyticsEvent;
use crate::auth::UserEmail;
use crate::errors::AppError;
use crate::history::filter::GenerationFilter;
use crate::models::generation::GenerationRecord;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub q: Option<String>,
    /// Comma-separated platform names.
    pub platform: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerationListResponse {
    pub generations: Vec<GenerationRecord>,
}

/// GET /api/v1/generations
pub async fn handle_list_generations(
    State(state): State<AppState>,
    UserEmail(email): UserEmail,
    Query(params): Query<ListQuery>,
) -> Result<Json<GenerationListResponse>, AppError> {
    let filter = GenerationFilter::parse(params.q.as_deref(), params.platform.as_deref())
        .map_err(AppError::Validation)?;

    let generations = state.store.list_generations(&email, None).await?;

    Ok(Json(GenerationListResponse {
        generations: filter.apply(generations),
    }))
}

/// GET /api/v1/generations/:id
pub async fn handle_get_generation(
    State(state): State<AppState>,
    UserEmail(email): UserEmail,
    Path(id): Path<String>,
) -> Result<Json<GenerationRecord>, AppError> {
    let record = owned_generation(&state, &email, &id).await?;
    Ok(Json(record))
}

/// DELETE /api/v1/generations/:id
pub async fn handle_delete_generation(
    State(state): State<AppState>,
    UserEmail(email): UserEmail,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    owned_generation(&state, &email, &id).await?;

    if !state.store.delete_generation(&id).await? {
        return Err(AppError::NotFound(format!("Generation {id} not found")));
    }

    state.events.record(AnalyticsEvent::GenerationDeleted {
        email,
        generation_id: id,
    });

    Ok(StatusCode::NO_CONTENT)
}

/// Loads a generation, rejecting ids that belong to someone else.
async fn owned_generation(
    state: &AppState,
    email: &str,
    id: &str,
) -> Result<GenerationRecord, AppError> {
    let record = state
        .store
        .get_generation(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Generation {id} not found")))?;

    if record.user_email != email {
        return Err(AppError::Forbidden);
    }
    Ok(record)
}
