use anyhow::Result;
use clap::Args;
use newsfeed_cache::NewsService;

use crate::app::App;
use crate::commands::fetch_repeated;
use crate::output::{print_articles, OutputFormat};

#[derive(Args)]
pub struct CategoryArgs {
    /// Category name (e.g. business, sports, technology)
    pub category: String,

    /// Two-letter country code (e.g. us, gb, de)
    #[arg(long, default_value = "us")]
    pub country: String,

    /// Page number
    #[arg(long, default_value = "1")]
    pub page: i64,

    /// Issue the same request this many times (later ones hit the cache)
    #[arg(long, default_value = "1")]
    pub repeat: u32,
}

pub async fn run(args: &CategoryArgs, app: &App, format: &OutputFormat) -> Result<()> {
    let category = args.category.to_lowercase();
    let country = args.country.to_lowercase();
    let articles = fetch_repeated(args.repeat, || {
        app.service
            .category_headlines(&category, &country, args.page)
    })
    .await?;

    eprintln!(
        "Page {} of {} headlines for {} ({} articles)",
        args.page,
        category,
        country,
        articles.len()
    );
    print_articles(&articles, format)
}
