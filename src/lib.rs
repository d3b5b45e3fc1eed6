pub mod aggregator;
pub mod catalog;
pub mod classifier;
pub mod pipeline;
pub mod reddit;
pub mod store;
pub mod taxonomy;
pub mod types;

pub use aggregator::TrendingAggregator;
pub use catalog::SourceCatalog;
pub use classifier::TopicClassifier;
pub use pipeline::{MemePipeline, PipelineSummary};
pub use reddit::{ListingMode, RedditClient};
pub use store::MemeStore;
pub use taxonomy::{MemeCategory, Subcategory};
pub use types::*;
