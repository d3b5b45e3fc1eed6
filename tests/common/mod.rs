#![allow(dead_code)]

use meme_aggregator::RedditPost;
use serde_json::{json, Value};

pub fn make_post(
    id: &str,
    title: &str,
    url: &str,
    score: i64,
    upvote_ratio: f64,
    created_utc: f64,
) -> RedditPost {
    RedditPost {
        id: id.to_string(),
        title: title.to_string(),
        url: url.to_string(),
        subreddit: "testsub".to_string(),
        score,
        upvote_ratio,
        created_utc,
    }
}

/// Wraps posts in the listing envelope the endpoint serves:
/// `{ data: { children: [ { data: post } ] } }`.
pub fn listing_json(posts: &[RedditPost]) -> Value {
    let children: Vec<Value> = posts.iter().map(|post| json!({ "data": post })).collect();
    json!({ "data": { "children": children } })
}

pub fn now_epoch() -> f64 {
    chrono::Utc::now().timestamp() as f64
}
