use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;
use uuid::Uuid;

use crate::store::MemeStore;
use crate::taxonomy::MemeCategory;
use crate::types::{MemeTopic, RedditPost, StorageError};

/// Education titles are routed to the programming subcategory before any
/// other rule runs.
const EDUCATION_KEYWORDS: [&str; 14] = [
    "exam",
    "student",
    "study",
    "homework",
    "assignment",
    "college",
    "university",
    "school",
    "cheating",
    "grade",
    "professor",
    "teacher",
    "lecture",
    "class",
];

/// Assigns a (category, subcategory) pair to a post from its title using
/// the fixed keyword tables, builds the resulting topic, and persists it
/// together with the post. The decision itself has no failure mode; only
/// the write can fail.
pub struct TopicClassifier {
    store: Arc<MemeStore>,
}

impl TopicClassifier {
    pub fn new(store: Arc<MemeStore>) -> Self {
        Self { store }
    }

    /// Classifies one post and writes the topic and the post to the store
    /// in a single transaction before returning the topic.
    pub async fn classify(&self, post: &RedditPost) -> Result<MemeTopic, StorageError> {
        let topic = self.build_topic(post);
        self.store.save_classified(&topic, post).await?;
        debug!(
            "Classified '{}' as {}/{}",
            post.title,
            topic.category.as_str(),
            topic.subcategory_id.as_deref().unwrap_or("-")
        );
        Ok(topic)
    }

    /// Deterministic topic construction; a fresh identifier is generated
    /// each call, everything else depends only on the post.
    pub fn build_topic(&self, post: &RedditPost) -> MemeTopic {
        let (category, subcategory_id) = determine_category(&post.title);
        MemeTopic {
            id: Uuid::new_v4().to_string(),
            title: post.title.clone(),
            category,
            subcategory_id: subcategory_id.map(|id| id.to_string()),
            created_at: post.created_utc as i64,
            trending_score: topic_trending_score(post),
            is_active: true,
        }
    }
}

/// A topic's persisted trending score: popularity weighted by upvote ratio,
/// with no recency term. Distinct from the aggregator's ranking score.
pub fn topic_trending_score(post: &RedditPost) -> f64 {
    post.score as f64 * post.upvote_ratio
}

/// Ordered rule evaluation over the lowercased title; the first matching
/// rule wins.
pub fn determine_category(title: &str) -> (MemeCategory, Option<&'static str>) {
    let title = title.to_lowercase();

    // 1. Education keywords route straight to Tech/programming.
    if EDUCATION_KEYWORDS.iter().any(|k| title.contains(k)) {
        return (MemeCategory::Tech, Some("programming"));
    }

    // 2. Subcategory keywords, in category-then-subcategory order. A whole-
    //    title substring hit wins outright; otherwise a word-level match
    //    against the keyword set counts.
    let title_words: Vec<&str> = title.split_whitespace().collect();
    for category in MemeCategory::ALL {
        for subcategory in category.subcategories() {
            let substring_hit = subcategory.keywords.iter().any(|k| title.contains(k));
            let word_hit = subcategory
                .keywords
                .iter()
                .any(|k| title_words.iter().any(|word| word.contains(k)));
            if substring_hit || word_hit {
                return (category, Some(subcategory.id));
            }
        }
    }

    // 3. Coarse per-category keywords, category unset at the subcategory
    //    level.
    for category in MemeCategory::ALL {
        if category.coarse_keywords().iter().any(|k| title.contains(k)) {
            return (category, None);
        }
    }

    // 4. Entity-like tokens from the title against the same coarse sets.
    let entities = entity_terms(&title);
    for category in MemeCategory::ALL {
        if category
            .coarse_keywords()
            .iter()
            .any(|k| entities.contains(*k))
        {
            return (category, None);
        }
    }

    (MemeCategory::Other, None)
}

/// Word-level tokenization of an already-lowercased title, with stop words
/// and punctuation stripped, as a stand-in entity set.
fn entity_terms(title: &str) -> HashSet<String> {
    title
        .split_whitespace()
        .map(|word| {
            word.trim_matches(|c: char| !c.is_alphanumeric())
                .to_string()
        })
        .filter(|word| !word.is_empty() && !is_stop_word(word))
        .collect()
}

fn is_stop_word(word: &str) -> bool {
    matches!(
        word,
        "the" | "and" | "or" | "but" | "in" | "on" | "at" | "to" | "for" | "of" | "with" | "by"
            | "a" | "an" | "is" | "are" | "was" | "were" | "be" | "been" | "have" | "has" | "had"
            | "do" | "does" | "did" | "will" | "would" | "could" | "should" | "may" | "might"
            | "must" | "can" | "this" | "that" | "these" | "those"
    )
}
