use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::state::AppState;
use crate::store::Stats;

/// GET /api/stats
/// Global usage counters across all users.
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<Stats>, AppError> {
    Ok(Json(state.store.stats().await?))
}
