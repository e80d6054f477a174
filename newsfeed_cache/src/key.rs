//! Cache keys for the four request shapes the news layer caches.

use std::fmt;

/// Identity of one cacheable request.
///
/// Equality and hashing are over the variant and its fields, so two keys
/// that happened to render to the same string still stay distinct.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CacheKey {
    BreakingNews {
        country: String,
    },
    TopHeadlines {
        country: String,
        page: i64,
    },
    CategoryHeadlines {
        category: String,
        country: String,
        page: i64,
    },
    Article {
        id: String,
    },
}

/// Fieldless discriminant of a [`CacheKey`], handy for invalidation predicates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CacheKeyKind {
    BreakingNews,
    TopHeadlines,
    CategoryHeadlines,
    Article,
}

impl CacheKey {
    pub fn breaking_news(country: &str) -> Self {
        Self::BreakingNews {
            country: country.to_string(),
        }
    }

    pub fn top_headlines(country: &str, page: i64) -> Self {
        Self::TopHeadlines {
            country: country.to_string(),
            page,
        }
    }

    pub fn category_headlines(category: &str, country: &str, page: i64) -> Self {
        Self::CategoryHeadlines {
            category: category.to_string(),
            country: country.to_string(),
            page,
        }
    }

    pub fn article(id: &str) -> Self {
        Self::Article { id: id.to_string() }
    }

    pub fn kind(&self) -> CacheKeyKind {
        match self {
            Self::BreakingNews { .. } => CacheKeyKind::BreakingNews,
            Self::TopHeadlines { .. } => CacheKeyKind::TopHeadlines,
            Self::CategoryHeadlines { .. } => CacheKeyKind::CategoryHeadlines,
            Self::Article { .. } => CacheKeyKind::Article,
        }
    }

    pub fn is_breaking_news(&self) -> bool {
        self.kind() == CacheKeyKind::BreakingNews
    }

    pub fn is_category_headlines(&self) -> bool {
        self.kind() == CacheKeyKind::CategoryHeadlines
    }

    /// The country parameter, for every variant that has one.
    pub fn country(&self) -> Option<&str> {
        match self {
            Self::BreakingNews { country }
            | Self::TopHeadlines { country, .. }
            | Self::CategoryHeadlines { country, .. } => Some(country),
            Self::Article { .. } => None,
        }
    }

    /// Deterministic string form used as the storage identifier.
    ///
    /// Parameters are inserted verbatim; normalizing them is the caller's job.
    pub fn canonical_string(&self) -> String {
        match self {
            Self::BreakingNews { country } => format!("breaking_{}", country),
            Self::TopHeadlines { country, page } => format!("headlines_{}_{}", country, page),
            Self::CategoryHeadlines {
                category,
                country,
                page,
            } => format!("category_{}_{}_{}", category, country, page),
            Self::Article { id } => format!("article_{}", id),
        }
    }

    /// Filesystem-safe form of [`canonical_string`](Self::canonical_string):
    /// ASCII alphanumerics, `-` and `_` are kept, everything else becomes `_`.
    pub fn file_stem(&self) -> String {
        sanitize_file_stem(&self.canonical_string())
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_string())
    }
}

pub(crate) fn sanitize_file_stem(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
