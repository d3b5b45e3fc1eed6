mod common;

use common::{make_post, now_epoch};
use meme_aggregator::aggregator::{
    dedup_posts, is_image_post, is_recent, normalize, rank_posts, rank_score, title_similarity,
    RECENCY_WINDOW_SECS,
};

#[test]
fn normalize_lowercases_and_trims() {
    assert_eq!(normalize("  Https://I.Redd.It/ABC.jpg "), "https://i.redd.it/abc.jpg");
}

#[test]
fn url_duplicates_keep_at_most_one() {
    let now = now_epoch();
    let posts = vec![
        make_post("a", "First meme", "https://i.redd.it/abc.jpg", 10, 0.9, now),
        make_post("b", "Totally unrelated words here", " HTTPS://i.redd.it/ABC.JPG ", 20, 0.9, now),
    ];

    let kept = dedup_posts(posts);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].id, "a");
}

#[test]
fn similar_titles_above_threshold_keep_at_most_one() {
    let now = now_epoch();
    // 8 of 10 words shared: similarity 0.8 > 0.70.
    let posts = vec![
        make_post(
            "a",
            "w1 w2 w3 w4 w5 w6 w7 w8 x1 x2",
            "https://i.redd.it/one.jpg",
            10,
            0.9,
            now,
        ),
        make_post(
            "b",
            "w1 w2 w3 w4 w5 w6 w7 w8 y1 y2",
            "https://i.redd.it/two.jpg",
            20,
            0.9,
            now,
        ),
    ];

    let kept = dedup_posts(posts);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept[0].id, "a");
}

#[test]
fn similarity_at_exactly_the_threshold_keeps_both() {
    let now = now_epoch();
    // 7 of 10 words shared: similarity is exactly 0.70, which is not a
    // duplicate under the strict comparison.
    let a = "w1 w2 w3 w4 w5 w6 w7 x1 x2 x3";
    let b = "w1 w2 w3 w4 w5 w6 w7 y1 y2 y3";
    assert!((title_similarity(a, b) - 0.70).abs() < 1e-12);

    let posts = vec![
        make_post("a", a, "https://i.redd.it/one.jpg", 10, 0.9, now),
        make_post("b", b, "https://i.redd.it/two.jpg", 20, 0.9, now),
    ];
    assert_eq!(dedup_posts(posts).len(), 2);
}

#[test]
fn empty_titles_never_count_as_similar() {
    assert_eq!(title_similarity("", ""), 0.0);
    assert_eq!(title_similarity("some words", ""), 0.0);
}

#[test]
fn non_image_posts_are_filtered_out() {
    let now = now_epoch();
    let posts = vec![
        make_post("a", "An article", "https://example.com/story.html", 10, 0.9, now),
        make_post("b", "Hosted image", "https://i.redd.it/xyz", 10, 0.9, now),
        make_post("c", "Plain image", "https://example.com/pic.PNG", 10, 0.9, now),
    ];

    let kept = dedup_posts(posts);
    let ids: Vec<&str> = kept.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["b", "c"]);
}

#[test]
fn image_detection_accepts_extensions_and_known_hosts() {
    let now = now_epoch();
    assert!(is_image_post(&make_post("a", "t", "https://example.com/a.jpeg", 1, 0.5, now)));
    assert!(is_image_post(&make_post("b", "t", "https://imgur.com/gallery/abc", 1, 0.5, now)));
    assert!(!is_image_post(&make_post("c", "t", "https://example.com/a", 1, 0.5, now)));
    assert!(!is_image_post(&make_post("d", "t", "not a url", 1, 0.5, now)));
}

#[test]
fn recency_window_is_strict() {
    let now = now_epoch();
    let just_inside = make_post("a", "t", "https://i.redd.it/a.jpg", 1, 0.5, now - (RECENCY_WINDOW_SECS - 1.0));
    let just_outside = make_post("b", "t", "https://i.redd.it/b.jpg", 1, 0.5, now - (RECENCY_WINDOW_SECS + 1.0));
    let on_the_boundary = make_post("c", "t", "https://i.redd.it/c.jpg", 1, 0.5, now - RECENCY_WINDOW_SECS);

    assert!(is_recent(&just_inside, now));
    assert!(!is_recent(&just_outside, now));
    assert!(!is_recent(&on_the_boundary, now));
}

#[test]
fn rank_score_weights_popularity_by_recency() {
    let now = now_epoch();
    // One hour old: 100 * 0.9 * 1/(1+1) = 45.
    let post = make_post("a", "t", "https://i.redd.it/a.jpg", 100, 0.9, now - 3600.0);
    assert!((rank_score(&post, now) - 45.0).abs() < 1e-9);
}

#[test]
fn future_timestamps_get_no_extra_bonus() {
    let now = now_epoch();
    // Age floors at zero, so the bonus caps at 1.
    let post = make_post("a", "t", "https://i.redd.it/a.jpg", 100, 0.9, now + 7200.0);
    assert!((rank_score(&post, now) - 90.0).abs() < 1e-9);
}

#[test]
fn ranking_sorts_descending_and_is_stable_for_ties() {
    let now = now_epoch();
    let mut posts = vec![
        make_post("low", "t", "https://i.redd.it/1.jpg", 10, 0.5, now - 3600.0),
        make_post("tie1", "t", "https://i.redd.it/2.jpg", 50, 0.8, now - 3600.0),
        make_post("tie2", "t", "https://i.redd.it/3.jpg", 50, 0.8, now - 3600.0),
        make_post("high", "t", "https://i.redd.it/4.jpg", 500, 0.9, now - 3600.0),
    ];

    rank_posts(&mut posts, now);
    let ids: Vec<&str> = posts.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["high", "tie1", "tie2", "low"]);
}
