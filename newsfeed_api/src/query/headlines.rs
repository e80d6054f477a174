//! The [`Query`] trait and the [`HeadlinesQuery`] builder used for the
//! `/top-headlines` and `/breaking` endpoints.

use url::Url;

/// Trait implemented by query builders.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;
}

/// Query parameters for headline listings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeadlinesQuery {
    /// Two-letter country code, passed through as given.
    pub country: String,
    /// Optional category filter (e.g. `business`, `sports`).
    pub category: Option<String>,
    /// Page number (1-indexed). Defaults to 1.
    pub page: i64,
    /// Results per page. `None` uses the API default.
    pub page_size: Option<i64>,
}

impl HeadlinesQuery {
    pub fn new(country: &str) -> Self {
        Self {
            country: country.to_string(),
            category: None,
            page: 1,
            page_size: None,
        }
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    /// Sets the page number (1-indexed).
    pub fn with_page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }

    /// Sets the number of results per page.
    pub fn with_page_size(mut self, page_size: i64) -> Self {
        self.page_size = Some(page_size);
        self
    }
}

impl Query for HeadlinesQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut().append_pair("country", &self.country);
        if let Some(category) = &self.category {
            url.query_pairs_mut().append_pair("category", category);
        }
        url.query_pairs_mut()
            .append_pair("page", &self.page.to_string());
        if let Some(page_size) = self.page_size {
            url.query_pairs_mut()
                .append_pair("pageSize", &page_size.to_string());
        };
        url
    }
}
