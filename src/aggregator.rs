use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use url::Url;

use crate::catalog::SourceCatalog;
use crate::reddit::{ListingMode, RedditClient};
use crate::taxonomy::MemeCategory;
use crate::types::{FetchError, RedditPost, SourceFailure, TrendingGroup, TrendingReport};

/// A post older than this is dropped from aggregation, evaluated against
/// fetch time rather than storage time.
pub const RECENCY_WINDOW_SECS: f64 = 5.0 * 24.0 * 60.0 * 60.0;

/// Titles sharing strictly more than this fraction of their word sets are
/// treated as duplicates.
pub const TITLE_SIMILARITY_THRESHOLD: f64 = 0.70;

const IMAGE_EXTENSIONS: [&str; 4] = [".jpg", ".jpeg", ".png", ".gif"];
const IMAGE_HOSTS: [&str; 3] = ["i.redd.it", "i.imgur.com", "imgur.com"];

/// Fans out concurrent listing fetches over a curated source catalog and
/// folds the results through the dedup, recency, and ranking passes.
pub struct TrendingAggregator {
    client: Arc<RedditClient>,
    catalog: SourceCatalog,
}

impl TrendingAggregator {
    pub fn new(client: Arc<RedditClient>, catalog: SourceCatalog) -> Self {
        Self { client, catalog }
    }

    /// Fetches the hot, new, and top-of-day listings for one source
    /// concurrently, then filters, dedups, ranks, and truncates to `limit`.
    /// A failure in any listing mode propagates; there is no redundancy to
    /// fall back on for a single source.
    pub async fn fetch_trending_for_source(
        &self,
        subreddit: &str,
        limit: u32,
    ) -> Result<Vec<RedditPost>, FetchError> {
        let (hot, new, top) = tokio::join!(
            self.client.fetch_listing(subreddit, &ListingMode::Hot, limit),
            self.client.fetch_listing(subreddit, &ListingMode::New, limit),
            self.client.fetch_listing(subreddit, &ListingMode::TopDay, limit),
        );

        let mut combined = hot?;
        combined.extend(new?);
        combined.extend(top?);

        let now = Utc::now().timestamp() as f64;
        let recent: Vec<RedditPost> = combined
            .into_iter()
            .filter(|post| is_recent(post, now))
            .collect();

        let mut posts = dedup_posts(recent);
        rank_posts(&mut posts, now);
        posts.truncate(limit as usize);

        info!("r/{}: {} trending posts after dedup", subreddit, posts.len());
        Ok(posts)
    }

    /// Runs the full aggregation over the curated catalog. Never fails:
    /// per-source errors are collected in the report and logged, so one
    /// failing source only costs its own group. A single set of seen image
    /// URLs spans the search pass and the per-source pass, updated
    /// sequentially between fetches.
    pub async fn fetch_all_trending(&self) -> TrendingReport {
        let mut report = TrendingReport::default();
        let mut seen: HashSet<String> = HashSet::new();
        let now = Utc::now().timestamp() as f64;

        let tournament = self.search_tournament_posts(&mut report, &mut seen, now).await;
        if !tournament.is_empty() {
            report.groups.push(TrendingGroup {
                label: self.catalog.search_group_label.clone(),
                posts: tournament,
            });
        }

        for (_, subreddits) in &self.catalog.sources_by_category {
            for subreddit in subreddits {
                match self
                    .fetch_trending_for_source(subreddit, self.catalog.per_source_limit)
                    .await
                {
                    Ok(posts) => {
                        let unique: Vec<RedditPost> = posts
                            .into_iter()
                            .filter(|post| seen.insert(normalize(&post.url)))
                            .collect();
                        if !unique.is_empty() {
                            report.groups.push(TrendingGroup {
                                label: subreddit.clone(),
                                posts: unique,
                            });
                        }
                    }
                    Err(error) => {
                        warn!("Skipping r/{}: {}", subreddit, error);
                        report.failures.push(SourceFailure {
                            subreddit: subreddit.clone(),
                            error,
                        });
                    }
                }
            }
        }

        info!(
            "Aggregation finished: {} groups, {} posts, {} source failures",
            report.groups.len(),
            report.total_posts(),
            report.failures.len()
        );
        report
    }

    /// Specialized search pass over the Sports sources using the fixed
    /// tournament queries. Valid and recent posts only, sorted by raw
    /// popularity descending.
    async fn search_tournament_posts(
        &self,
        report: &mut TrendingReport,
        seen: &mut HashSet<String>,
        now: f64,
    ) -> Vec<RedditPost> {
        let mut candidates = Vec::new();

        for subreddit in self.catalog.sources_for(MemeCategory::Sports) {
            for query in &self.catalog.search_queries {
                let mode = ListingMode::Search(query.clone());
                match self
                    .client
                    .fetch_listing(subreddit, &mode, self.catalog.per_source_limit)
                    .await
                {
                    Ok(posts) => candidates.extend(posts),
                    Err(error) => {
                        warn!("Search '{}' failed on r/{}: {}", query, subreddit, error);
                        report.failures.push(SourceFailure {
                            subreddit: subreddit.clone(),
                            error,
                        });
                    }
                }
            }
        }

        let mut posts: Vec<RedditPost> = candidates
            .into_iter()
            .filter(|post| is_image_post(post) && is_recent(post, now))
            .collect();
        posts.sort_by(|a, b| b.score.cmp(&a.score));
        posts
            .into_iter()
            .filter(|post| seen.insert(normalize(&post.url)))
            .collect()
    }
}

/// Lowercase + trim, applied to URLs and titles before any comparison.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Word-set similarity: |intersection| / max(|A|, |B|). Inputs are assumed
/// normalized. Empty sets never count as similar.
pub fn title_similarity(a: &str, b: &str) -> f64 {
    let words_a: HashSet<&str> = a.split_whitespace().collect();
    let words_b: HashSet<&str> = b.split_whitespace().collect();
    if words_a.is_empty() || words_b.is_empty() {
        return 0.0;
    }

    let common = words_a.intersection(&words_b).count();
    common as f64 / words_a.len().max(words_b.len()) as f64
}

/// Dedup within one source's combined listing: exact normalized-URL match
/// first, then title similarity against every previously accepted title,
/// then the image-validity filter. O(n²) in candidates, which the listing
/// limit bounds to tens of items.
pub fn dedup_posts(posts: Vec<RedditPost>) -> Vec<RedditPost> {
    let mut seen_urls: HashSet<String> = HashSet::new();
    let mut seen_titles: Vec<String> = Vec::new();
    let mut kept = Vec::new();

    for post in posts {
        if !seen_urls.insert(normalize(&post.url)) {
            continue;
        }

        let title = normalize(&post.title);
        let duplicate_title = seen_titles
            .iter()
            .any(|existing| title_similarity(&title, existing) > TITLE_SIMILARITY_THRESHOLD);
        if duplicate_title {
            continue;
        }
        seen_titles.push(title);

        if is_image_post(&post) {
            kept.push(post);
        }
    }

    kept
}

/// A post is plausibly an image post if its URL ends in a recognized image
/// extension or resolves to a recognized image-hosting domain.
pub fn is_image_post(post: &RedditPost) -> bool {
    let url = normalize(&post.url);
    if IMAGE_EXTENSIONS.iter().any(|ext| url.ends_with(ext)) {
        return true;
    }

    match Url::parse(&post.url) {
        Ok(parsed) => parsed
            .host_str()
            .map(|host| IMAGE_HOSTS.contains(&host))
            .unwrap_or(false),
        Err(_) => false,
    }
}

/// Strictly-within-five-days recency check, relative to `now` (epoch secs).
pub fn is_recent(post: &RedditPost, now: f64) -> bool {
    now - post.created_utc < RECENCY_WINDOW_SECS
}

/// Recency-weighted popularity used to order posts within an aggregation
/// pass: `score × upvote_ratio × 1/(age_hours + 1)`, age floored at zero.
/// Not the same quantity as a topic's persisted trending score.
pub fn rank_score(post: &RedditPost, now: f64) -> f64 {
    let age_hours = ((now - post.created_utc) / 3600.0).max(0.0);
    post.score as f64 * post.upvote_ratio * (1.0 / (age_hours + 1.0))
}

/// Stable descending sort by rank score; ties keep input order.
pub fn rank_posts(posts: &mut [RedditPost], now: f64) {
    posts.sort_by(|a, b| {
        rank_score(b, now)
            .partial_cmp(&rank_score(a, now))
            .unwrap_or(Ordering::Equal)
    });
}
