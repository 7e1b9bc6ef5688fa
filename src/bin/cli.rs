use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use trivia_api::db;
use trivia_api::seed::{clear, export_dir, import_dir};
use trivia_api::telemetry::init_tracing;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Database URL, e.g. sqlite:trivia.db?mode=rwc
    database_url: String,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import categories.csv and questions.csv from a directory
    Import { path: PathBuf },
    /// Export all data as CSV into a directory
    Export { path: PathBuf },
    /// Delete all questions and categories
    Clear,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let pool = db::establish_connection(&cli.database_url, 1)
        .await
        .context("Cannot connect to DB")?;
    db::run_migrations(&pool).await?;

    match cli.command {
        Commands::Import { path } => {
            let report = import_dir(&pool, &path).await.context("Cannot import")?;
            println!(
                "Imported {} categories and {} questions, skipped {} rows",
                report.categories, report.questions, report.skipped
            );
        }
        Commands::Export { path } => export_dir(&pool, &path).await.context("Cannot export")?,
        Commands::Clear => {
            let (categories, questions) = clear(&pool).await?;
            println!("Deleted {questions} questions and {categories} categories");
        }
    }
    Ok(())
}
