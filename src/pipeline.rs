use tracing::{error, info, warn};

use crate::aggregator::TrendingAggregator;
use crate::classifier::TopicClassifier;
use crate::types::TrendingReport;

/// Driver glue: one aggregation pass, then classify-and-persist per post.
/// Storage failures are logged per item and never abort the run.
pub struct MemePipeline {
    aggregator: TrendingAggregator,
    classifier: TopicClassifier,
}

#[derive(Debug, Default)]
pub struct PipelineSummary {
    pub groups: usize,
    pub fetched: usize,
    pub stored: usize,
    pub source_failures: usize,
    pub storage_failures: usize,
}

impl MemePipeline {
    pub fn new(aggregator: TrendingAggregator, classifier: TopicClassifier) -> Self {
        Self {
            aggregator,
            classifier,
        }
    }

    pub async fn run(&self) -> PipelineSummary {
        let report = self.aggregator.fetch_all_trending().await;
        self.persist_report(&report).await
    }

    async fn persist_report(&self, report: &TrendingReport) -> PipelineSummary {
        let mut summary = PipelineSummary {
            groups: report.groups.len(),
            fetched: report.total_posts(),
            source_failures: report.failures.len(),
            ..Default::default()
        };

        for failure in &report.failures {
            warn!("Source r/{} failed: {}", failure.subreddit, failure.error);
        }

        for group in &report.groups {
            for post in &group.posts {
                match self.classifier.classify(post).await {
                    Ok(topic) => {
                        summary.stored += 1;
                        info!(
                            "[{}] {} -> {}/{}",
                            group.label,
                            post.title,
                            topic.category.as_str(),
                            topic.subcategory_id.as_deref().unwrap_or("-")
                        );
                    }
                    Err(e) => {
                        summary.storage_failures += 1;
                        error!("Failed to persist '{}': {}", post.title, e);
                    }
                }
            }
        }

        info!(
            "Pipeline run: {} groups, {}/{} posts stored, {} source failures, {} storage failures",
            summary.groups,
            summary.stored,
            summary.fetched,
            summary.source_failures,
            summary.storage_failures
        );
        summary
    }
}
