use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::types::{FetchConfig, FetchError, RedditPost};

/// Retrieval strategy against one source.
#[derive(Debug, Clone, PartialEq)]
pub enum ListingMode {
    Hot,
    New,
    TopDay,
    Search(String),
}

#[derive(Debug, Deserialize)]
struct RedditListing {
    data: RedditListingData,
}

#[derive(Debug, Deserialize)]
struct RedditListingData {
    children: Vec<RedditChild>,
}

#[derive(Debug, Deserialize)]
struct RedditChild {
    data: RedditPost,
}

/// Thin client for the Reddit listing endpoints. No retries here; failures
/// propagate to the caller.
pub struct RedditClient {
    client: Client,
    config: FetchConfig,
}

impl RedditClient {
    pub fn new(config: FetchConfig) -> Self {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    pub async fn fetch_listing(
        &self,
        subreddit: &str,
        mode: &ListingMode,
        limit: u32,
    ) -> Result<Vec<RedditPost>, FetchError> {
        let endpoint = self.listing_url(subreddit, mode, limit)?;
        debug!("Fetching listing: {}", endpoint);

        let response = self.client.get(endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::BadStatus(status.as_u16()));
        }

        let body = response.text().await?;
        let listing: RedditListing = serde_json::from_str(&body)?;

        let posts: Vec<RedditPost> = listing
            .data
            .children
            .into_iter()
            .map(|child| child.data)
            .collect();
        debug!("Parsed {} posts from r/{}", posts.len(), subreddit);

        Ok(posts)
    }

    fn listing_url(
        &self,
        subreddit: &str,
        mode: &ListingMode,
        limit: u32,
    ) -> Result<Url, FetchError> {
        let base = &self.config.base_url;
        let raw = match mode {
            ListingMode::Hot => format!("{base}/r/{subreddit}/hot.json?limit={limit}"),
            ListingMode::New => format!("{base}/r/{subreddit}/new.json?limit={limit}"),
            ListingMode::TopDay => format!("{base}/r/{subreddit}/top.json?t=day&limit={limit}"),
            ListingMode::Search(query) => {
                format!("{base}/r/{subreddit}/search.json?q={query}&sort=new&limit={limit}")
            }
        };
        Ok(Url::parse(&raw)?)
    }
}
