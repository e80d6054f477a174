use newsfeed_api::types::{ArticleResponse, ArticlesResponse};

#[test]
fn deserialize_top_headlines_fixture() {
    let fixture = include_str!("fixtures/top_headlines.json");
    let resp: ArticlesResponse = serde_json::from_str(fixture).unwrap();

    assert_eq!(resp.status, "ok");
    assert_eq!(resp.total_results, 2);
    assert_eq!(resp.articles.len(), 2);

    let first = &resp.articles[0];
    assert_eq!(first.id, "gb-2024-06-15-markets");
    assert_eq!(first.source.name, "Example News");
    assert_eq!(first.author.as_deref(), Some("Jane Doe"));
    assert_eq!(
        first.image_url.as_deref(),
        Some("https://news.example.com/img/markets.jpg")
    );
    assert_eq!(first.published_at.to_rfc3339(), "2024-06-15T08:30:00+00:00");

    let second = &resp.articles[1];
    assert!(second.description.is_none());
    assert!(second.source.id.is_none());
    assert!(second.category.is_none());
}

#[test]
fn deserialize_article_fixture() {
    let fixture = include_str!("fixtures/article.json");
    let resp: ArticleResponse = serde_json::from_str(fixture).unwrap();

    assert_eq!(resp.article.id, "gb-2024-06-15-markets");
    assert_eq!(resp.article.category.as_deref(), Some("business"));
}

#[test]
fn article_serializes_with_wire_names() {
    let fixture = include_str!("fixtures/article.json");
    let resp: ArticleResponse = serde_json::from_str(fixture).unwrap();
    let value = serde_json::to_value(&resp.article).unwrap();

    assert!(value.get("publishedAt").is_some());
    assert!(value.get("urlToImage").is_some());
    assert!(value.get("image_url").is_none());
}
