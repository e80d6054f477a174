use std::sync::Arc;

use newsfeed_cache::newsfeed_api::{Client, Error};
use newsfeed_cache::{CacheKey, CacheStore, CachingNewsService, MemoryCacheStore, NewsService};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn headlines_body(ids: &[&str]) -> serde_json::Value {
    let articles: Vec<serde_json::Value> = ids
        .iter()
        .map(|id| {
            serde_json::json!({
                "id": id,
                "title": format!("Story {}", id),
                "description": null,
                "url": format!("https://news.example.com/{}", id),
                "source": { "id": null, "name": "Example News" },
                "author": null,
                "publishedAt": "2024-06-15T08:30:00Z",
                "urlToImage": null,
                "content": null,
                "category": null
            })
        })
        .collect();
    serde_json::json!({
        "status": "ok",
        "totalResults": articles.len(),
        "articles": articles
    })
}

#[tokio::test]
async fn second_request_is_served_from_memory() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/top-headlines"))
        .and(query_param("country", "us"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(headlines_body(&["a", "b"])))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCacheStore::new());
    let service = CachingNewsService::new(
        Client::with_base_url(&server.uri(), "test-key"),
        Arc::clone(&store),
    );

    let first = service.top_headlines("us", 1).await.unwrap();
    let second = service.top_headlines("us", 1).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
    assert!(store.get(&CacheKey::top_headlines("us", 1)).is_some());
}

#[tokio::test]
async fn category_requests_use_their_own_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/top-headlines"))
        .and(query_param("category", "sports"))
        .respond_with(ResponseTemplate::new(200).set_body_json(headlines_body(&["s1"])))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCacheStore::new());
    let service = CachingNewsService::new(
        Client::with_base_url(&server.uri(), "test-key"),
        Arc::clone(&store),
    );

    service.category_headlines("sports", "us", 1).await.unwrap();
    service.category_headlines("sports", "us", 1).await.unwrap();

    assert_eq!(
        store.keys(),
        vec![CacheKey::category_headlines("sports", "us", 1)]
    );
}

#[tokio::test]
async fn http_errors_propagate_unchanged() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/breaking"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .expect(2)
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCacheStore::new());
    let service = CachingNewsService::new(
        Client::with_base_url(&server.uri(), "test-key"),
        Arc::clone(&store),
    );

    for _ in 0..2 {
        match service.breaking_news("us").await {
            Err(Error::HttpStatus { status, body }) => {
                assert_eq!(status, 503);
                assert_eq!(body, "maintenance");
            }
            _ => panic!("expected HttpStatus error"),
        }
    }
    assert!(store.is_empty());
}

#[tokio::test]
async fn missing_article_is_not_cached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/articles/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let store = Arc::new(MemoryCacheStore::new());
    let service = CachingNewsService::new(
        Client::with_base_url(&server.uri(), "test-key"),
        Arc::clone(&store),
    );

    let result = service.article("gone").await;
    assert!(matches!(result, Err(Error::NotFound { .. })));
    assert!(store.get(&CacheKey::article("gone")).is_none());
}
