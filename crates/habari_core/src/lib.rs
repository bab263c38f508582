pub mod dedup;
pub mod enrich;
pub mod error;
pub mod rank;
pub mod storage;
pub mod trending;
pub mod types;

pub use error::Error;
pub use rank::Ranking;
pub use storage::ArticleStore;
pub use types::{Article, Category, SourceConfig};

pub type Result<T> = std::result::Result<T, Error>;

pub mod prelude {
    pub use crate::storage::ArticleStore;
    pub use crate::types::{Article, Category, SourceConfig};
    pub use crate::{Error, Result};
}
