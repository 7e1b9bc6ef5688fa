use anyhow::Context;
use clap::Parser;
use trivia_api::db;
use trivia_api::server::run_server;
use trivia_api::settings::Settings;
use trivia_api::telemetry::init_tracing;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Address to listen on, overrides TRIVIA_BIND_ADDR
    #[clap(long)]
    bind: Option<String>,
    /// Skip applying database migrations on startup
    #[clap(long)]
    no_migrate: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let settings = Settings::load().context("Failed to load settings")?;

    let pool = db::establish_connection(&settings.database_url, settings.max_connections)
        .await
        .with_context(|| format!("Cannot connect to {}", settings.database_url))?;

    if !cli.no_migrate {
        tracing::info!("Running db migrations...");
        db::run_migrations(&pool).await?;
    }

    let addr = cli.bind.unwrap_or(settings.bind_addr);
    run_server(pool, &addr).await
}
