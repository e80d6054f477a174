//! [`NewsService`] implementation for the HTTP client.

use async_trait::async_trait;
use newsfeed_api::types::Article;
use newsfeed_api::{Client, HeadlinesQuery};

use crate::service::NewsService;

#[async_trait]
impl NewsService for Client {
    type Error = newsfeed_api::Error;

    async fn top_headlines(&self, country: &str, page: i64) -> Result<Vec<Article>, Self::Error> {
        let query = HeadlinesQuery::new(country).with_page(page);
        self.get_top_headlines(&query).await
    }

    async fn category_headlines(
        &self,
        category: &str,
        country: &str,
        page: i64,
    ) -> Result<Vec<Article>, Self::Error> {
        let query = HeadlinesQuery::new(country)
            .with_category(category)
            .with_page(page);
        self.get_top_headlines(&query).await
    }

    async fn breaking_news(&self, country: &str) -> Result<Vec<Article>, Self::Error> {
        self.get_breaking_news(country).await
    }

    async fn article(&self, id: &str) -> Result<Article, Self::Error> {
        self.get_article(id).await
    }
}
