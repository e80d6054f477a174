use newsfeed_api::{HeadlinesQuery, Query};
use url::Url;

fn base_url() -> Url {
    Url::parse("https://example.com/top-headlines").unwrap()
}

#[test]
fn headlines_query_defaults() {
    let url = HeadlinesQuery::new("us").add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("country=us"));
    assert!(query.contains("page=1"));
    assert!(!query.contains("category="));
    assert!(!query.contains("pageSize="));
}

#[test]
fn headlines_query_with_category_and_paging() {
    let url = HeadlinesQuery::new("gb")
        .with_category("sports")
        .with_page(3)
        .with_page_size(50)
        .add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("country=gb"));
    assert!(query.contains("category=sports"));
    assert!(query.contains("page=3"));
    assert!(query.contains("pageSize=50"));
}

#[test]
fn headlines_query_encodes_values() {
    let url = HeadlinesQuery::new("us")
        .with_category("science & tech")
        .add_to_url(&base_url());
    let query = url.query().unwrap();
    assert!(query.contains("category=science+%26+tech"));
}

#[test]
fn headlines_query_passes_empty_country_through() {
    let url = HeadlinesQuery::new("").add_to_url(&base_url());
    assert!(url.query().unwrap().contains("country=&"));
}
