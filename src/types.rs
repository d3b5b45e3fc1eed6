use serde::{Deserialize, Serialize};

use crate::taxonomy::MemeCategory;

/// A single candidate image post as returned by a listing endpoint.
///
/// The `id` is assigned by the source and is not globally unique across
/// sources; `created_utc` is Unix epoch seconds as reported on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedditPost {
    pub id: String,
    pub title: String,
    pub url: String,
    pub subreddit: String,
    pub score: i64,
    pub upvote_ratio: f64,
    pub created_utc: f64,
}

/// A classified grouping record generated from one post.
///
/// Created exactly once per classified post and written to the store
/// immediately; never mutated afterwards by this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemeTopic {
    pub id: String,
    pub title: String,
    pub category: MemeCategory,
    pub subcategory_id: Option<String>,
    pub created_at: i64,
    pub trending_score: f64,
    pub is_active: bool,
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_seconds: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.reddit.com".to_string(),
            user_agent: "meme-aggregator/0.1".to_string(),
            timeout_seconds: 30,
        }
    }
}

/// Optional filters for topic queries; absent filters are unconstrained,
/// present ones are ANDed together.
#[derive(Debug, Clone, Default)]
pub struct TopicFilter {
    pub category: Option<MemeCategory>,
    pub subcategory_id: Option<String>,
    pub is_active: Option<bool>,
}

/// Outcome of one broad aggregation pass. Per-source failures are collected
/// here instead of aborting the pass, so one failing source only costs its
/// own group.
#[derive(Debug, Default)]
pub struct TrendingReport {
    pub groups: Vec<TrendingGroup>,
    pub failures: Vec<SourceFailure>,
}

impl TrendingReport {
    pub fn group(&self, label: &str) -> Option<&[RedditPost]> {
        self.groups
            .iter()
            .find(|g| g.label == label)
            .map(|g| g.posts.as_slice())
    }

    pub fn total_posts(&self) -> usize {
        self.groups.iter().map(|g| g.posts.len()).sum()
    }
}

#[derive(Debug)]
pub struct TrendingGroup {
    pub label: String,
    pub posts: Vec<RedditPost>,
}

#[derive(Debug)]
pub struct SourceFailure {
    pub subreddit: String,
    pub error: FetchError,
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("bad status: {0}")]
    BadStatus(u16),

    #[error("malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
