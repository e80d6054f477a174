mod app;
mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::app::{App, ConnectionArgs};
use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "newsfeed")]
#[command(about = "Read cached news headlines from the terminal")]
struct Cli {
    /// Output format: table, json, csv, or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Top headlines for a country
    Headlines(commands::headlines::HeadlinesArgs),
    /// Top headlines for a category within a country
    Category(commands::category::CategoryArgs),
    /// Breaking news for a country
    Breaking(commands::breaking::BreakingArgs),
    /// Show a single article
    Article(commands::article::ArticleArgs),
    /// Inspect or clear the on-disk cache
    Cache(commands::cache::CacheArgs),
}

const DEFAULT_LOG_DIRECTIVES: &str = "newsfeed=info,newsfeed_cache=info";

/// `RUST_LOG` when it is set and parses, otherwise info for our crates.
fn log_filter(rust_log: Option<String>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_DIRECTIVES))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok()))
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::parse(&cli.output);

    match &cli.command {
        Commands::Cache(args) => {
            let disk = app::open_disk(&cli.connection)?;
            commands::cache::run(args, &disk, &format)?
        }
        Commands::Headlines(args) => {
            let app = App::connect(&cli.connection)?;
            commands::headlines::run(args, &app, &format).await?
        }
        Commands::Category(args) => {
            let app = App::connect(&cli.connection)?;
            commands::category::run(args, &app, &format).await?
        }
        Commands::Breaking(args) => {
            let app = App::connect(&cli.connection)?;
            commands::breaking::run(args, &app, &format).await?
        }
        Commands::Article(args) => {
            let app = App::connect(&cli.connection)?;
            commands::article::run(args, &app, &format).await?
        }
    }

    Ok(())
}
