//! The closed set of payload shapes the news cache stores.

use newsfeed_api::types::Article;
use serde::{Deserialize, Serialize};

/// Rough per-article memory footprint used for cost accounting.
pub const ARTICLE_COST_BYTES: usize = 1024;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum CachedPayload {
    Articles(Vec<Article>),
    Article(Article),
}

impl CachedPayload {
    /// Approximate in-memory size: 1 KiB per article.
    pub fn estimated_cost(&self) -> usize {
        match self {
            Self::Articles(list) => list.len().saturating_mul(ARTICLE_COST_BYTES),
            Self::Article(_) => ARTICLE_COST_BYTES,
        }
    }

    pub fn into_articles(self) -> Option<Vec<Article>> {
        match self {
            Self::Articles(list) => Some(list),
            Self::Article(_) => None,
        }
    }

    pub fn into_article(self) -> Option<Article> {
        match self {
            Self::Article(article) => Some(article),
            Self::Articles(_) => None,
        }
    }
}

impl From<Vec<Article>> for CachedPayload {
    fn from(list: Vec<Article>) -> Self {
        Self::Articles(list)
    }
}

impl From<Article> for CachedPayload {
    fn from(article: Article) -> Self {
        Self::Article(article)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{DateTime, Utc};
    use newsfeed_api::types::{Article, Source};

    pub fn article(id: &str) -> Article {
        Article {
            id: id.to_string(),
            title: format!("Headline {}", id),
            description: Some("Summary".to_string()),
            url: format!("https://news.example.com/{}", id),
            source: Source {
                id: None,
                name: "Example News".to_string(),
            },
            author: None,
            published_at: DateTime::<Utc>::from_timestamp(1_718_440_000, 0).unwrap(),
            image_url: None,
            content: None,
            category: None,
        }
    }

    pub fn articles(n: usize) -> Vec<Article> {
        (0..n).map(|i| article(&format!("a{}", i))).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{article, articles};
    use super::*;

    #[test]
    fn cost_scales_with_article_count() {
        assert_eq!(CachedPayload::from(articles(3)).estimated_cost(), 3 * 1024);
        assert_eq!(CachedPayload::from(articles(0)).estimated_cost(), 0);
        assert_eq!(CachedPayload::from(article("x")).estimated_cost(), 1024);
    }

    #[test]
    fn shape_accessors() {
        assert!(CachedPayload::from(article("x")).into_articles().is_none());
        assert_eq!(
            CachedPayload::from(article("x")).into_article().map(|a| a.id),
            Some("x".to_string())
        );
        assert_eq!(
            CachedPayload::from(articles(2)).into_articles().map(|l| l.len()),
            Some(2)
        );
    }

    #[test]
    fn serialized_form_is_tagged() {
        let value = serde_json::to_value(CachedPayload::from(article("x"))).unwrap();
        assert_eq!(value["kind"], "article");
        assert_eq!(value["data"]["id"], "x");
    }
}
