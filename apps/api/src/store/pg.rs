use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use crate::models::generation::GenerationRecord;
use crate::models::user::UserRecord;
use crate::store::{GenerationStore, SignIn, Stats, StoreError};

/// Idempotent schema, applied at startup. One statement per entry.
const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        email            TEXT PRIMARY KEY,
        name             TEXT,
        generation_count INTEGER NOT NULL DEFAULT 0,
        created_at       TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS generations (
        id          TEXT PRIMARY KEY,
        user_email  TEXT NOT NULL,
        prompt      TEXT NOT NULL,
        platform    TEXT NOT NULL,
        content     TEXT NOT NULL,
        title       TEXT,
        seo_tags    TEXT[] NOT NULL DEFAULT '{}',
        created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS generations_user_created_idx
        ON generations (user_email, created_at DESC)
    "#,
];

const GENERATION_COLUMNS: &str =
    "id, user_email, prompt, platform, content, title, seo_tags, created_at";

/// PostgreSQL-backed store.
#[derive(Clone)]
pub struct PgGenerationStore {
    pool: PgPool,
}

impl PgGenerationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Creates tables and indexes if they do not exist yet.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        info!("Database schema is up to date");
        Ok(())
    }
}

#[async_trait]
impl GenerationStore for PgGenerationStore {
    async fn upsert_user(&self, email: &str, name: Option<&str>) -> Result<SignIn, StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (email, name)
            VALUES ($1, $2)
            ON CONFLICT (email) DO NOTHING
            "#,
        )
        .bind(email)
        .bind(name)
        .execute(&self.pool)
        .await?;

        Ok(if result.rows_affected() == 1 {
            SignIn::Created
        } else {
            SignIn::Existing
        })
    }

    async fn get_user(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let user = sqlx::query_as::<_, UserRecord>(
            "SELECT email, name, generation_count, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn update_user_name(
        &self,
        email: &str,
        name: &str,
    ) -> Result<Option<UserRecord>, StoreError> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            UPDATE users SET name = $2
            WHERE email = $1
            RETURNING email, name, generation_count, created_at
            "#,
        )
        .bind(email)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn save_generations(
        &self,
        email: &str,
        records: &[GenerationRecord],
    ) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        for record in records {
            sqlx::query(
                r#"
                INSERT INTO generations
                    (id, user_email, prompt, platform, content, title, seo_tags, created_at)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                "#,
            )
            .bind(&record.id)
            .bind(&record.user_email)
            .bind(&record.prompt)
            .bind(&record.platform)
            .bind(&record.content)
            .bind(&record.title)
            .bind(&record.seo_tags)
            .bind(record.created_at)
            .execute(&mut *tx)
            .await?;
        }

        sqlx::query(
            r#"
            INSERT INTO users (email, generation_count)
            VALUES ($1, $2)
            ON CONFLICT (email)
            DO UPDATE SET generation_count = users.generation_count + EXCLUDED.generation_count
            "#,
        )
        .bind(email)
        .bind(records.len() as i32)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn list_generations(
        &self,
        email: &str,
        limit: Option<i64>,
    ) -> Result<Vec<GenerationRecord>, StoreError> {
        // LIMIT NULL is "no limit" in PostgreSQL.
        let records = sqlx::query_as::<_, GenerationRecord>(&format!(
            "SELECT {GENERATION_COLUMNS} FROM generations \
             WHERE user_email = $1 ORDER BY created_at DESC LIMIT $2"
        ))
        .bind(email)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    async fn get_generation(&self, id: &str) -> Result<Option<GenerationRecord>, StoreError> {
        let record = sqlx::query_as::<_, GenerationRecord>(&format!(
            "SELECT {GENERATION_COLUMNS} FROM generations WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    async fn delete_generation(&self, id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM generations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_user(&self, email: &str) -> Result<u64, StoreError> {
        let mut tx = self.pool.begin().await?;

        let removed = sqlx::query("DELETE FROM generations WHERE user_email = $1")
            .bind(email)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM users WHERE email = $1")
            .bind(email)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(removed)
    }

    async fn stats(&self) -> Result<Stats, StoreError> {
        let (total_generations, total_users, total_generation_count) =
            sqlx::query_as::<_, (i64, i64, i64)>(
                r#"
                SELECT
                    (SELECT COUNT(*) FROM generations),
                    (SELECT COUNT(*) FROM users),
                    (SELECT COALESCE(SUM(generation_count), 0)::BIGINT FROM users)
                "#,
            )
            .fetch_one(&self.pool)
            .await?;

        Ok(Stats {
            total_generations,
            total_users,
            total_generation_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    async fn connect() -> PgGenerationStore {
        dotenvy::dotenv().ok();
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL not set");
        let store = PgGenerationStore::new(PgPool::connect(&url).await.unwrap());
        store.migrate().await.unwrap();
        store
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL"]
    async fn test_save_list_and_delete_user() {
        let store = connect().await;
        let email = format!("pg-test-{}@example.com", uuid::Uuid::new_v4());
        let record = GenerationRecord {
            id: format!("{}-blog-pgtest", Utc::now().timestamp_millis()),
            user_email: email.clone(),
            prompt: "Topic".to_string(),
            platform: "blog".to_string(),
            content: "Body".to_string(),
            title: Some("Title".to_string()),
            seo_tags: vec!["rust".to_string()],
            created_at: Utc::now(),
        };

        assert_eq!(store.upsert_user(&email, None).await.unwrap(), SignIn::Created);
        store.save_generations(&email, &[record.clone()]).await.unwrap();

        let listed = store.list_generations(&email, Some(3)).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].seo_tags, record.seo_tags);
        assert_eq!(
            store.get_user(&email).await.unwrap().unwrap().generation_count,
            1
        );

        let renamed = store.update_user_name(&email, "Ada").await.unwrap().unwrap();
        assert_eq!(renamed.name.as_deref(), Some("Ada"));
        assert_eq!(renamed.generation_count, 1);

        assert_eq!(store.delete_user(&email).await.unwrap(), 1);
        assert!(store.update_user_name(&email, "Gone").await.unwrap().is_none());
        assert!(store.get_generation(&record.id).await.unwrap().is_none());
    }
}
