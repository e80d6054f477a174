use serde::{Deserialize, Serialize};

use super::Article;

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlesResponse {
    pub status: String,
    pub total_results: i64,
    pub articles: Vec<Article>,
}

#[derive(Serialize, Deserialize)]
pub struct ArticleResponse {
    pub status: String,
    pub article: Article,
}
