use anyhow::Context;
use bookrack_kernel::settings::Settings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().with_context(|| "failed to load Bookrack settings")?;

    bookrack_telemetry::init(&settings.telemetry)?;

    tracing::info!(
        env = ?settings.environment,
        db = %settings.database.url,
        "bookrack-app bootstrap starting"
    );

    bookrack_app::run(settings).await
}
