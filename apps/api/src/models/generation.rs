use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One persisted generation: a single platform's result for a single submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRecord {
    /// `{unix_millis}-{platform}-{random suffix}`
    pub id: String,
    pub user_email: String,
    pub prompt: String,
    pub platform: String,
    pub content: String,
    pub title: Option<String>,
    pub seo_tags: Vec<String>,
    pub created_at: DateTime<Utc>,
}
