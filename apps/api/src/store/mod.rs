//! Persistence boundary for generations and users.
//!
//! Handlers only see `Arc<dyn GenerationStore>`. Production runs on PostgreSQL
//! (`PgGenerationStore`); tests use `MemoryGenerationStore`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::generation::platform::Platform;
use crate::models::generation::GenerationRecord;
use crate::models::user::UserRecord;

pub mod memory;
pub mod pg;

pub use memory::MemoryGenerationStore;
pub use pg::PgGenerationStore;

const ID_SUFFIX_LEN: usize = 8;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Whether a sign-in created the user row or found an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignIn {
    Created,
    Existing,
}

/// Global usage counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_generations: i64,
    pub total_users: i64,
    /// Sum of every user's generation counter. Survives deleted generations.
    pub total_generation_count: i64,
}

#[async_trait]
pub trait GenerationStore: Send + Sync {
    /// Creates the user row on first sign-in; never overwrites an existing one.
    async fn upsert_user(&self, email: &str, name: Option<&str>) -> Result<SignIn, StoreError>;

    async fn get_user(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Sets the user's display name. `None` if the user does not exist.
    async fn update_user_name(
        &self,
        email: &str,
        name: &str,
    ) -> Result<Option<UserRecord>, StoreError>;

    /// Persists all `records` for `email` and bumps the user's counter by their
    /// number, atomically. Creates the user row if it is missing.
    async fn save_generations(
        &self,
        email: &str,
        records: &[GenerationRecord],
    ) -> Result<(), StoreError>;

    /// The user's generations, newest first, at most `limit` if given.
    async fn list_generations(
        &self,
        email: &str,
        limit: Option<i64>,
    ) -> Result<Vec<GenerationRecord>, StoreError>;

    async fn get_generation(&self, id: &str) -> Result<Option<GenerationRecord>, StoreError>;

    /// Returns false if no such generation existed.
    async fn delete_generation(&self, id: &str) -> Result<bool, StoreError>;

    /// Deletes the user row and all of the user's generations. Returns the number
    /// of generations removed.
    async fn delete_user(&self, email: &str) -> Result<u64, StoreError>;

    async fn stats(&self) -> Result<Stats, StoreError>;
}

/// Generation ids are `{unix_millis}-{platform}-{random suffix}`.
pub fn new_generation_id(platform: Platform, at: DateTime<Utc>) -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!(
        "{}-{}-{}",
        at.timestamp_millis(),
        platform,
        &random[..ID_SUFFIX_LEN]
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_generation_id_shape() {
        let at = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let id = new_generation_id(Platform::TwitterPro, at);

        assert!(id.starts_with("1700000000123-twitter-pro-"), "{id}");
        let suffix = id.rsplit('-').next().unwrap();
        assert_eq!(suffix.len(), ID_SUFFIX_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_generation_ids_differ() {
        let at = Utc::now();
        assert_ne!(
            new_generation_id(Platform::Blog, at),
            new_generation_id(Platform::Blog, at)
        );
    }
}
