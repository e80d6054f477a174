//! HTTP client for the news REST backend.

use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    query::{HeadlinesQuery, Query},
    types::{Article, ArticleResponse, ArticlesResponse},
    Error,
};

const DEFAULT_BASE_URL: &str = "https://api.newsfeed.dev/v2";

/// Request timeout for every backend call.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the news backend.
///
/// Every request carries the API key in the `X-Api-Key` header. Each request
/// builds a fresh `reqwest::Client` with a 30-second timeout. There is no
/// retry here; callers that want retries wrap the client.
pub struct Client {
    /// Base URL for the API, without a trailing slash.
    base_api_url: String,
    api_key: String,
}

impl Client {
    /// Creates a new client pointing at the production backend.
    pub fn new(api_key: &str) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, api_key)
    }

    /// Creates a new client with a custom base URL. Used for testing with wiremock.
    pub fn with_base_url(base_url: &str, api_key: &str) -> Self {
        Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    fn get_url(&self, path: &str, query: Option<&impl Query>) -> Result<Url, Error> {
        let url = Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::RequestFailed
        })?;
        Ok(match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        })
    }

    /// Sends a GET and returns the status plus raw body.
    async fn send<Q>(&self, path: &str, query: Option<&Q>) -> Result<(StatusCode, String), Error>
    where
        Q: Query,
    {
        let url = self.get_url(path, query)?;
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::RequestFailed
            })?;
        let resp = client
            .get(url)
            .header("accept", "application/json")
            .header("x-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Failed to get resource: {}", e);
                Error::RequestFailed
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::RequestFailed
        })?;
        Ok((status, body))
    }

    async fn get<T, Q>(&self, path: &str, query: Option<&Q>) -> Result<T, Error>
    where
        T: DeserializeOwned,
        Q: Query,
    {
        let (status, body) = self.send(path, query).await?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        parse_body(&body)
    }

    /// Fetches one page of top headlines for a country.
    pub async fn get_top_headlines(&self, query: &HeadlinesQuery) -> Result<Vec<Article>, Error> {
        let resp = self
            .get::<ArticlesResponse, HeadlinesQuery>("/top-headlines", Some(query))
            .await?;
        Ok(resp.articles)
    }

    /// Fetches the current breaking-news list for a country.
    pub async fn get_breaking_news(&self, country: &str) -> Result<Vec<Article>, Error> {
        let query = HeadlinesQuery::new(country);
        let resp = self
            .get::<ArticlesResponse, HeadlinesQuery>("/breaking", Some(&query))
            .await?;
        Ok(resp.articles)
    }

    /// Fetches a single article by its ID. A 404 maps to [`Error::NotFound`].
    pub async fn get_article(&self, id: &str) -> Result<Article, Error> {
        if is_dot_segment(id) {
            tracing::debug!("Rejecting dot-segment article id {:?}", id);
            return Err(Error::NotFound { id: id.to_string() });
        }
        let path = format!("/articles/{}", encode_path_segment(id));
        let (status, body) = self.send::<HeadlinesQuery>(&path, None).await?;

        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound { id: id.to_string() });
        }
        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        let resp: ArticleResponse = parse_body(&body)?;
        Ok(resp.article)
    }
}

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str::<T>(body).map_err(|e| {
        let snippet = truncate_body(body);
        tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
        Error::RequestFailed
    })
}

/// Percent-encodes everything outside the unreserved set so an ID can
/// never add path segments. Dot segments are not made safe here; see
/// [`is_dot_segment`].
fn encode_path_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

/// `.` and `..` (escaped or not) are resolved by URL parsing, so they can
/// never address a single resource.
fn is_dot_segment(segment: &str) -> bool {
    matches!(
        segment.to_ascii_lowercase().as_str(),
        "." | "%2e" | ".." | ".%2e" | "%2e." | "%2e%2e"
    )
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
