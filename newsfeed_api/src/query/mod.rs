mod headlines;
pub use self::headlines::{HeadlinesQuery, Query};
