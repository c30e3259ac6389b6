use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

use crate::store::PgGenerationStore;

/// Creates a PostgreSQL connection pool and brings the schema up to date.
pub async fn connect_store(database_url: &str) -> Result<PgGenerationStore> {
    info!("Connecting to PostgreSQL...");
    let pool = create_pool(database_url).await?;
    info!("PostgreSQL connection pool established");

    let store = PgGenerationStore::new(pool);
    store.migrate().await?;
    Ok(store)
}

async fn create_pool(database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;
    Ok(pool)
}
