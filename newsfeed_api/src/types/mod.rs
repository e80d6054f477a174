mod response;
pub use self::response::{ArticleResponse, ArticlesResponse};

mod article;
pub use self::article::{Article, ArticleID, Source};
