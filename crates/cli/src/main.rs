use anyhow::Context;
use clap::{Parser, Subcommand};

use bookrack_kernel::settings::Settings;
use bookrack_kernel::ModuleRegistry;

#[derive(Parser)]
#[command(name = "bookrack", about = "Book catalog administration", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve,
    /// Create the database schema and exit
    CreateDb,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load().with_context(|| "failed to load Bookrack settings")?;
    bookrack_telemetry::init(&settings.telemetry)?;

    tracing::info!(env = ?settings.environment, "bookrack cli starting");

    match cli.command {
        Command::Serve => bookrack_app::run(settings).await,
        Command::CreateDb => create_db(settings).await,
    }
}

async fn create_db(settings: Settings) -> anyhow::Result<()> {
    let pool = bookrack_db::connect(&settings.database).await?;

    let mut registry = ModuleRegistry::new();
    bookrack_app::modules::register_all(&mut registry);
    bookrack_db::run_migrations(&pool, &registry.collect_migrations()).await?;

    println!("Database Created Successfully");
    Ok(())
}
