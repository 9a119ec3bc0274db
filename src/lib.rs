//! Bookrack application library: a personal book catalog served over HTTP.

pub mod modules;

use std::sync::Arc;

use bookrack_auth::StaticCredentials;
use bookrack_kernel::settings::Settings;
use bookrack_kernel::{AppState, InitCtx, ModuleRegistry};

/// Run the application: open the store, register modules, apply
/// migrations, and serve HTTP until shutdown.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let pool = bookrack_db::connect(&settings.database).await?;

    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry);

    bookrack_db::run_migrations(&pool, &registry.collect_migrations()).await?;

    let ctx = InitCtx {
        settings: &settings,
        db: &pool,
    };
    registry.init_all(&ctx).await?;

    let state = AppState::new(
        Arc::new(settings),
        pool,
        Arc::new(StaticCredentials::default()),
    );

    bookrack_http::start_server(&registry, state).await
}
