use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use meme_aggregator::{
    FetchConfig, MemePipeline, MemeStore, RedditClient, SourceCatalog, TopicClassifier,
    TrendingAggregator,
};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "meme-aggregator", about = "Fetch, rank, classify, and store trending memes")]
struct Args {
    /// SQLite database path
    #[arg(long, default_value = "memes.db")]
    database: String,

    /// Maximum posts kept per source
    #[arg(long, default_value_t = 25)]
    limit: u32,

    /// Fetch a single subreddit instead of the whole curated catalog
    #[arg(long)]
    subreddit: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let database_url = format!("sqlite://{}", args.database);
    let store = Arc::new(
        MemeStore::connect(&database_url)
            .await
            .with_context(|| format!("failed to open store at {}", args.database))?,
    );

    let client = Arc::new(RedditClient::new(FetchConfig::default()));
    let mut catalog = SourceCatalog::curated();
    catalog.per_source_limit = args.limit;

    let aggregator = TrendingAggregator::new(client, catalog);
    let classifier = TopicClassifier::new(store);

    match args.subreddit {
        Some(subreddit) => {
            info!("Fetching trending posts from r/{}", subreddit);
            let posts = aggregator
                .fetch_trending_for_source(&subreddit, args.limit)
                .await
                .with_context(|| format!("failed to fetch r/{subreddit}"))?;
            info!("Fetched {} posts from r/{}", posts.len(), subreddit);
            for post in &posts {
                let topic = classifier.classify(post).await?;
                info!(
                    "{} -> {}/{}",
                    post.title,
                    topic.category.as_str(),
                    topic.subcategory_id.as_deref().unwrap_or("-")
                );
            }
        }
        None => {
            info!("Running full aggregation over the curated catalog");
            let pipeline = MemePipeline::new(aggregator, classifier);
            let summary = pipeline.run().await;
            info!(
                "Done: stored {} of {} posts across {} groups",
                summary.stored, summary.fetched, summary.groups
            );
        }
    }

    Ok(())
}
