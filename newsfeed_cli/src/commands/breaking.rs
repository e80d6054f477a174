use anyhow::Result;
use clap::Args;
use newsfeed_cache::NewsService;

use crate::app::App;
use crate::commands::fetch_repeated;
use crate::output::{print_articles, OutputFormat};

#[derive(Args)]
pub struct BreakingArgs {
    /// Two-letter country code (e.g. us, gb, de)
    #[arg(long, default_value = "us")]
    pub country: String,

    /// Issue the same request this many times (later ones hit the cache)
    #[arg(long, default_value = "1")]
    pub repeat: u32,
}

pub async fn run(args: &BreakingArgs, app: &App, format: &OutputFormat) -> Result<()> {
    let country = args.country.to_lowercase();
    let articles =
        fetch_repeated(args.repeat, || app.service.breaking_news(&country)).await?;

    if articles.is_empty() {
        eprintln!("No breaking news for {}", country);
        return Ok(());
    }
    print_articles(&articles, format)
}
