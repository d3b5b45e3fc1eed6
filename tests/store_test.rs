mod common;

use common::make_post;
use meme_aggregator::{MemeCategory, MemeStore, MemeTopic, TopicFilter};

fn make_topic(id: &str, category: MemeCategory, subcategory_id: Option<&str>, trending_score: f64, is_active: bool) -> MemeTopic {
    MemeTopic {
        id: id.to_string(),
        title: format!("topic {id}"),
        category,
        subcategory_id: subcategory_id.map(|s| s.to_string()),
        created_at: 1_700_000_000,
        trending_score,
        is_active,
    }
}

#[tokio::test]
async fn post_round_trips_through_the_store() {
    let store = MemeStore::connect("sqlite::memory:").await.unwrap();

    let topic = make_topic("t1", MemeCategory::Tech, Some("programming"), 42.0, true);
    store.save_topic(&topic).await.unwrap();

    let post = make_post(
        "srcid1",
        "Compiler bug ruins my day",
        "https://i.redd.it/bug.jpg",
        321,
        0.87,
        1_700_000_100.0,
    );
    store.save_post(&post, Some("t1")).await.unwrap();

    let found = store.get_posts_for_topic("t1").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, "srcid1");
    assert_eq!(found[0].title, "Compiler bug ruins my day");
    assert_eq!(found[0].url, "https://i.redd.it/bug.jpg");
    assert_eq!(found[0].subreddit, "testsub");
    assert_eq!(found[0].score, 321);
    assert!((found[0].upvote_ratio - 0.87).abs() < 1e-9);
    assert_eq!(found[0].created_utc, 1_700_000_100.0);
}

#[tokio::test]
async fn posts_without_a_topic_are_allowed() {
    let store = MemeStore::connect("sqlite::memory:").await.unwrap();

    let post = make_post("orphan", "No topic yet", "https://i.redd.it/x.jpg", 1, 0.5, 1.0);
    store.save_post(&post, None).await.unwrap();

    assert!(store.get_posts_for_topic("missing").await.unwrap().is_empty());
}

#[tokio::test]
async fn posts_come_back_newest_first() {
    let store = MemeStore::connect("sqlite::memory:").await.unwrap();
    let topic = make_topic("t1", MemeCategory::Other, None, 1.0, true);
    store.save_topic(&topic).await.unwrap();

    let older = make_post("old", "older meme words", "https://i.redd.it/1.jpg", 1, 0.5, 100.0);
    let newer = make_post("new", "fresh unrelated title", "https://i.redd.it/2.jpg", 1, 0.5, 200.0);
    store.save_post(&older, Some("t1")).await.unwrap();
    store.save_post(&newer, Some("t1")).await.unwrap();

    let found = store.get_posts_for_topic("t1").await.unwrap();
    let ids: Vec<&str> = found.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["new", "old"]);
}

#[tokio::test]
async fn topic_filters_compose_and_order_by_trending_score() {
    let store = MemeStore::connect("sqlite::memory:").await.unwrap();

    store
        .save_topic(&make_topic("tech_active", MemeCategory::Tech, Some("ai_ml"), 5.0, true))
        .await
        .unwrap();
    store
        .save_topic(&make_topic("tech_inactive", MemeCategory::Tech, None, 9.0, false))
        .await
        .unwrap();
    store
        .save_topic(&make_topic("sports_active", MemeCategory::Sports, Some("cricket"), 7.0, true))
        .await
        .unwrap();

    let all = store.get_topics(&TopicFilter::default()).await.unwrap();
    let ids: Vec<&str> = all.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["tech_inactive", "sports_active", "tech_active"]);

    let filter = TopicFilter {
        category: Some(MemeCategory::Tech),
        is_active: Some(true),
        ..Default::default()
    };
    let tech_active = store.get_topics(&filter).await.unwrap();
    assert_eq!(tech_active.len(), 1);
    assert_eq!(tech_active[0].id, "tech_active");

    let filter = TopicFilter {
        subcategory_id: Some("cricket".to_string()),
        ..Default::default()
    };
    let cricket = store.get_topics(&filter).await.unwrap();
    assert_eq!(cricket.len(), 1);
    assert_eq!(cricket[0].id, "sports_active");
}

#[tokio::test]
async fn saving_a_topic_twice_replaces_it() {
    let store = MemeStore::connect("sqlite::memory:").await.unwrap();

    store
        .save_topic(&make_topic("t1", MemeCategory::Tech, None, 1.0, true))
        .await
        .unwrap();
    store
        .save_topic(&make_topic("t1", MemeCategory::Tech, None, 99.0, true))
        .await
        .unwrap();

    let all = store.get_topics(&TopicFilter::default()).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].trending_score, 99.0);
}

#[tokio::test]
async fn save_classified_writes_topic_and_linked_post() {
    let store = MemeStore::connect("sqlite::memory:").await.unwrap();

    let topic = make_topic("t1", MemeCategory::Sports, Some("cricket"), 10.0, true);
    let post = make_post("srcid1", "Cricket final memes", "https://i.redd.it/c.jpg", 10, 1.0, 50.0);
    store.save_classified(&topic, &post).await.unwrap();

    let topics = store.get_topics(&TopicFilter::default()).await.unwrap();
    assert_eq!(topics.len(), 1);
    assert_eq!(topics[0], topic);

    let posts = store.get_posts_for_topic("t1").await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].id, "srcid1");
}
