use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type ArticleID = String;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    pub id: Option<String>,
    pub name: String,
}

/// A single news article as returned by the backend.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: ArticleID,

    pub title: String,

    pub description: Option<String>,

    pub url: String,

    pub source: Source,

    pub author: Option<String>,

    pub published_at: DateTime<Utc>,

    #[serde(rename = "urlToImage")]
    pub image_url: Option<String>,

    pub content: Option<String>,

    pub category: Option<String>,
}
