use anyhow::Result;
use clap::Args;
use newsfeed_cache::NewsService;

use crate::app::App;
use crate::output::{print_article, OutputFormat};

#[derive(Args)]
pub struct ArticleArgs {
    /// Article ID as shown in listings
    pub id: String,
}

pub async fn run(args: &ArticleArgs, app: &App, format: &OutputFormat) -> Result<()> {
    let article = app.service.article(args.id.trim()).await?;
    print_article(&article, format)
}
