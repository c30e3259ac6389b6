//! In-process store. Backs the router tests; nothing is durable.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::generation::GenerationRecord;
use crate::models::user::UserRecord;
use crate::store::{GenerationStore, SignIn, Stats, StoreError};

#[derive(Default)]
struct Inner {
    users: HashMap<String, UserRecord>,
    generations: Vec<GenerationRecord>,
}

#[derive(Default)]
pub struct MemoryGenerationStore {
    inner: RwLock<Inner>,
}

impl MemoryGenerationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn new_user(email: &str, name: Option<&str>) -> UserRecord {
    UserRecord {
        email: email.to_string(),
        name: name.map(str::to_string),
        generation_count: 0,
        created_at: Utc::now(),
    }
}

#[async_trait]
impl GenerationStore for MemoryGenerationStore {
    async fn upsert_user(&self, email: &str, name: Option<&str>) -> Result<SignIn, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.users.contains_key(email) {
            return Ok(SignIn::Existing);
        }
        inner.users.insert(email.to_string(), new_user(email, name));
        Ok(SignIn::Created)
    }

    async fn get_user(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.inner.read().await.users.get(email).cloned())
    }

    async fn update_user_name(
        &self,
        email: &str,
        name: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner.users.get_mut(email).map(|user| {
            user.name = Some(name.to_string());
            user.clone()
        }))
    }

    async fn save_generations(
        &self,
        email: &str,
        records: &[GenerationRecord],
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let user = inner
            .users
            .entry(email.to_string())
            .or_insert_with(|| new_user(email, None));
        user.generation_count += records.len() as i32;
        inner.generations.extend_from_slice(records);
        Ok(())
    }

    async fn list_generations(
        &self,
        email: &str,
        limit: Option<i64>,
    ) -> Result<Vec<GenerationRecord>, StoreError> {
        let inner = self.inner.read().await;
        let mut records: Vec<GenerationRecord> = inner
            .generations
            .iter()
            .filter(|g| g.user_email == email)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if let Some(limit) = limit {
            records.truncate(limit.max(0) as usize);
        }
        Ok(records)
    }

    async fn get_generation(&self, id: &str) -> Result<Option<GenerationRecord>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.generations.iter().find(|g| g.id == id).cloned())
    }

    async fn delete_generation(&self, id: &str) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        let before = inner.generations.len();
        inner.generations.retain(|g| g.id != id);
        Ok(inner.generations.len() != before)
    }

    async fn delete_user(&self, email: &str) -> Result<u64, StoreError> {
        let mut inner = self.inner.write().await;
        let before = inner.generations.len();
        inner.generations.retain(|g| g.user_email != email);
        inner.users.remove(email);
        Ok((before - inner.generations.len()) as u64)
    }

    async fn stats(&self) -> Result<Stats, StoreError> {
        let inner = self.inner.read().await;
        Ok(Stats {
            total_generations: inner.generations.len() as i64,
            total_users: inner.users.len() as i64,
            total_generation_count: inner
                .users
                .values()
                .map(|u| i64::from(u.generation_count))
                .sum(),
        })
    }
}
