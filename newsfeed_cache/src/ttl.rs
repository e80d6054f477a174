//! Per-key freshness rules.

use std::time::Duration;

use crate::key::CacheKey;

const MINUTE: u64 = 60;

/// Maps each [`CacheKey`] to how long its cached value stays fresh.
///
/// The defaults encode the product rules: breaking news goes stale fastest,
/// deeper headline pages change least, single articles are nearly static.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TtlPolicy {
    pub breaking_news: Duration,
    pub headlines_first_page: Duration,
    pub headlines_later_pages: Duration,
    pub category_headlines: Duration,
    pub article: Duration,
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self {
            breaking_news: Duration::from_secs(5 * MINUTE),
            headlines_first_page: Duration::from_secs(10 * MINUTE),
            headlines_later_pages: Duration::from_secs(30 * MINUTE),
            category_headlines: Duration::from_secs(10 * MINUTE),
            article: Duration::from_secs(60 * MINUTE),
        }
    }
}

impl TtlPolicy {
    pub fn ttl(&self, key: &CacheKey) -> Duration {
        match key {
            CacheKey::BreakingNews { .. } => self.breaking_news,
            CacheKey::TopHeadlines { page: 1, .. } => self.headlines_first_page,
            CacheKey::TopHeadlines { .. } => self.headlines_later_pages,
            CacheKey::CategoryHeadlines { .. } => self.category_headlines,
            CacheKey::Article { .. } => self.article,
        }
    }

    pub fn with_breaking_news(mut self, ttl: Duration) -> Self {
        self.breaking_news = ttl;
        self
    }

    pub fn with_headlines_first_page(mut self, ttl: Duration) -> Self {
        self.headlines_first_page = ttl;
        self
    }

    pub fn with_headlines_later_pages(mut self, ttl: Duration) -> Self {
        self.headlines_later_pages = ttl;
        self
    }

    pub fn with_category_headlines(mut self, ttl: Duration) -> Self {
        self.category_headlines = ttl;
        self
    }

    pub fn with_article(mut self, ttl: Duration) -> Self {
        self.article = ttl;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mins(n: u64) -> Duration {
        Duration::from_secs(n * 60)
    }

    #[test]
    fn default_rules() {
        let policy = TtlPolicy::default();
        assert_eq!(policy.ttl(&CacheKey::breaking_news("us")), mins(5));
        assert_eq!(policy.ttl(&CacheKey::top_headlines("us", 1)), mins(10));
        assert_eq!(policy.ttl(&CacheKey::top_headlines("us", 2)), mins(30));
        assert_eq!(policy.ttl(&CacheKey::top_headlines("us", 99)), mins(30));
        assert_eq!(
            policy.ttl(&CacheKey::category_headlines("sports", "us", 1)),
            mins(10)
        );
        assert_eq!(
            policy.ttl(&CacheKey::category_headlines("sports", "us", 4)),
            mins(10)
        );
        assert_eq!(policy.ttl(&CacheKey::article("a1")), mins(60));
    }

    #[test]
    fn non_positive_pages_use_later_page_rule() {
        let policy = TtlPolicy::default();
        assert_eq!(policy.ttl(&CacheKey::top_headlines("us", 0)), mins(30));
        assert_eq!(policy.ttl(&CacheKey::top_headlines("us", -3)), mins(30));
    }

    #[test]
    fn overrides_apply_to_their_rule_only() {
        let policy = TtlPolicy::default().with_breaking_news(Duration::from_secs(5));
        assert_eq!(
            policy.ttl(&CacheKey::breaking_news("gb")),
            Duration::from_secs(5)
        );
        assert_eq!(policy.ttl(&CacheKey::article("x")), mins(60));
    }
}
