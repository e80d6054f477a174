use newsfeed_api::{Client, Error, HeadlinesQuery};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

#[tokio::test]
async fn get_top_headlines_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("top_headlines.json");

    Mock::given(method("GET"))
        .and(path("/top-headlines"))
        .and(query_param("country", "gb"))
        .and(query_param("page", "1"))
        .and(header("x-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), "test-key");
    let result = client.get_top_headlines(&HeadlinesQuery::new("gb")).await;
    assert!(result.is_ok());

    let articles = result.unwrap();
    assert_eq!(articles.len(), 2);
    assert_eq!(articles[0].title, "Markets rally as inflation cools");
}

#[tokio::test]
async fn get_category_headlines_sends_category() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("top_headlines.json");

    Mock::given(method("GET"))
        .and(path("/top-headlines"))
        .and(query_param("category", "business"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), "test-key");
    let query = HeadlinesQuery::new("us")
        .with_category("business")
        .with_page(2);
    let articles = client.get_top_headlines(&query).await.unwrap();
    assert_eq!(articles.len(), 2);
}

#[tokio::test]
async fn get_breaking_news_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("top_headlines.json");

    Mock::given(method("GET"))
        .and(path("/breaking"))
        .and(query_param("country", "us"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), "test-key");
    let articles = client.get_breaking_news("us").await.unwrap();
    assert_eq!(articles[1].id, "gb-2024-06-15-weather");
}

#[tokio::test]
async fn get_article_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("article.json");

    Mock::given(method("GET"))
        .and(path("/articles/gb-2024-06-15-markets"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), "test-key");
    let article = client.get_article("gb-2024-06-15-markets").await.unwrap();
    assert_eq!(article.source.name, "Example News");
}

#[tokio::test]
async fn get_article_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/articles/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), "test-key");
    let result = client.get_article("missing").await;
    assert!(matches!(result, Err(Error::NotFound { ref id }) if id == "missing"));
}

#[tokio::test]
async fn get_top_headlines_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/top-headlines"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), "test-key");
    let result = client.get_top_headlines(&HeadlinesQuery::new("us")).await;
    match result {
        Err(Error::HttpStatus { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "Internal Server Error");
        }
        _ => panic!("expected HttpStatus error"),
    }
}

#[tokio::test]
async fn get_top_headlines_malformed_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/top-headlines"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not valid json}"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&mock_server.uri(), "test-key");
    let result = client.get_top_headlines(&HeadlinesQuery::new("us")).await;
    assert!(matches!(result, Err(Error::RequestFailed)));
}
