//! SQLite persistence plumbing: pool creation and module migrations.

use std::str::FromStr;

use anyhow::Context;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use bookrack_kernel::settings::DatabaseSettings;
use bookrack_kernel::Migration;

/// Create the shared connection pool, creating the database file if absent.
pub async fn connect(settings: &DatabaseSettings) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&settings.url)
        .with_context(|| format!("invalid database url '{}'", settings.url))?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal);

    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_with(options)
        .await
        .with_context(|| "failed to open database")?;

    tracing::info!(url = %settings.url, "database pool ready");

    Ok(pool)
}

/// Execute the migrations collected from all registered modules.
///
/// Statements are expected to be idempotent (`CREATE TABLE IF NOT EXISTS`
/// style); the runner applies them in the registry's deterministic order.
pub async fn run_migrations(
    pool: &SqlitePool,
    migrations: &[(String, Migration)],
) -> anyhow::Result<()> {
    for (module, migration) in migrations {
        tracing::info!(module = %module, id = migration.id, "applying migration");

        sqlx::raw_sql(migration.up)
            .execute(pool)
            .await
            .with_context(|| format!("migration '{}/{}' failed", module, migration.id))?;
    }

    Ok(())
}
