pub mod aggregator;
pub mod export;
pub mod fetcher;
pub mod sources;

pub use aggregator::AggregationService;
pub use fetcher::{FeedFetcher, FetchOutcome};
pub use sources::default_sources;

pub mod prelude {
    pub use crate::aggregator::AggregationService;
    pub use crate::fetcher::FeedFetcher;
    pub use habari_core::{Article, Error, Result, SourceConfig};
}
