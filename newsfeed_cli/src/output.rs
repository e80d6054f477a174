use anyhow::Result;
use newsfeed_cache::types::Article;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "md" | "markdown" => OutputFormat::Markdown,
            _ => OutputFormat::Table,
        }
    }
}

#[derive(Tabled, Serialize)]
struct ArticleRow {
    #[tabled(rename = "Published")]
    #[serde(rename = "Published")]
    published: String,
    #[tabled(rename = "Source")]
    #[serde(rename = "Source")]
    source: String,
    #[tabled(rename = "Title")]
    #[serde(rename = "Title")]
    title: String,
    #[tabled(rename = "ID")]
    #[serde(rename = "ID")]
    id: String,
}

#[derive(Tabled, Serialize)]
pub struct CacheStatusRow {
    #[tabled(rename = "Key")]
    #[serde(rename = "Key")]
    pub key: String,
    #[tabled(rename = "File")]
    #[serde(rename = "File")]
    pub file: String,
    #[tabled(rename = "Age")]
    #[serde(rename = "Age")]
    pub age: String,
    #[tabled(rename = "Usable Offline")]
    #[serde(rename = "Usable Offline")]
    pub usable: bool,
}

const MAX_TITLE_CHARS: usize = 80;

fn build_article_rows(articles: &[Article]) -> Vec<ArticleRow> {
    articles
        .iter()
        .map(|a| ArticleRow {
            published: a.published_at.format("%Y-%m-%d %H:%M").to_string(),
            source: a.source.name.clone(),
            title: truncate_title(&a.title),
            id: a.id.clone(),
        })
        .collect()
}

fn truncate_title(title: &str) -> String {
    if title.chars().count() <= MAX_TITLE_CHARS {
        title.to_string()
    } else {
        let head: String = title.chars().take(MAX_TITLE_CHARS - 1).collect();
        format!("{}…", head)
    }
}

/// Prints a list of articles in the requested format.
pub fn print_articles(articles: &[Article], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", Table::new(build_article_rows(articles))),
        OutputFormat::Markdown => {
            let mut table = Table::new(build_article_rows(articles));
            table.with(Style::markdown());
            println!("{}", table);
        }
        OutputFormat::Csv => print_csv(build_article_rows(articles))?,
        OutputFormat::Json => print_json(&articles),
    }
    Ok(())
}

/// Prints a single article with its body text.
pub fn print_article(article: &Article, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(article),
        OutputFormat::Csv => print_csv(build_article_rows(std::slice::from_ref(article)))?,
        OutputFormat::Table | OutputFormat::Markdown => {
            println!("{}", article.title);
            println!(
                "{} | {}",
                article.source.name,
                article.published_at.format("%Y-%m-%d %H:%M UTC")
            );
            if let Some(author) = &article.author {
                println!("By {}", author);
            }
            println!("{}", article.url);
            if let Some(body) = article.content.as_ref().or(article.description.as_ref()) {
                println!();
                println!("{}", body);
            }
        }
    }
    Ok(())
}

pub fn print_cache_status(rows: Vec<CacheStatusRow>, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&rows),
        OutputFormat::Csv => print_csv(rows)?,
        OutputFormat::Markdown => {
            let mut table = Table::new(rows);
            table.with(Style::markdown());
            println!("{}", table);
        }
        OutputFormat::Table => println!("{}", Table::new(rows)),
    }
    Ok(())
}

fn print_csv<R: Serialize>(rows: Vec<R>) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(std::io::stdout());
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_json<T: serde::Serialize + ?Sized>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

/// Human-readable age, e.g. `42s`, `7m`, `3h 05m`.
pub fn format_age(age: std::time::Duration) -> String {
    let secs = age.as_secs();
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m", secs / 60)
    } else {
        format!("{}h {:02}m", secs / 3600, (secs % 3600) / 60)
    }
}
