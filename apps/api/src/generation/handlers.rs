//! Axum route handlers for the Generation API.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Serialize;
use tracing::info;

use crate::analytics::AnalyticsEvent;
use crate::auth::UserEmail;
use crate::errors::AppError;
use crate::generation::generator::{
    generate_content, generate_for_platforms, BatchGenerationRequest, GenerationRequest,
    GenerationResult,
};
use crate::models::generation::GenerationRecord;
use crate::state::AppState;
use crate::store::new_generation_id;

#[derive(Debug, Serialize)]
pub struct CreateGenerationsResponse {
    pub generations: Vec<GenerationRecord>,
}

/// POST /generate-content
///
/// Generates content for a single platform. Stateless: nothing is persisted.
pub async fn handle_generate_content(
    State(state): State<AppState>,
    payload: Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<GenerationResult>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    let normalized = generate_content(state.llm.as_ref(), &request).await?;

    Ok(Json(normalized.into_result()))
}

/// POST /api/v1/generations
///
/// Generates for every selected platform concurrently, then persists all results
/// for the caller. If any platform fails, nothing is stored.
pub async fn handle_create_generations(
    State(state): State<AppState>,
    UserEmail(email): UserEmail,
    payload: Result<Json<BatchGenerationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateGenerationsResponse>), AppError> {
    let Json(request) = payload.map_err(|e| AppError::Validation(e.body_text()))?;

    let results = generate_for_platforms(state.llm.as_ref(), &request).await?;

    let now = Utc::now();
    let records: Vec<GenerationRecord> = results
        .into_iter()
        .map(|(platform, result)| GenerationRecord {
            id: new_generation_id(platform, now),
            user_email: email.clone(),
            prompt: request.prompt.trim().to_string(),
            platform: platform.as_str().to_string(),
            content: result.content,
            title: result.title,
            seo_tags: result.seo_tags,
            created_at: now,
        })
        .collect();

    state.store.save_generations(&email, &records).await?;

    for record in &records {
        state.events.record(AnalyticsEvent::GenerationCreated {
            email: email.clone(),
            generation_id: record.id.clone(),
            platform: record.platform.clone(),
        });
    }

    info!("Stored {} generations for {}", records.len(), email);

    Ok((
        StatusCode::CREATED,
        Json(CreateGenerationsResponse {
            generations: records,
        }),
    ))
}
