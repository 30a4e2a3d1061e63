pub mod evaluator_repo;
pub mod event_repo;
pub mod prediction_repo;

use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, Transaction};

pub async fn init_pool(database_url: &str) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    // Verify connectivity
    sqlx::query("SELECT 1").execute(&pool).await?;

    Ok(pool)
}

/// Open a transaction at the strictest isolation level.
///
/// Every read and write of an evaluation pass runs on this transaction, so
/// concurrent passes (or a racing bet edit) observe each other's complete
/// effect or none of it. Dropping the transaction without commit rolls back.
pub async fn begin_serializable(pool: &PgPool) -> Result<Transaction<'_, Postgres>, sqlx::Error> {
    let mut tx = pool.begin().await?;
    sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
        .execute(&mut *tx)
        .await?;
    Ok(tx)
}
