use std::str::FromStr;

use sqlx::sqlite::{Sqlite, SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{QueryBuilder, Row};
use tracing::{debug, info};
use uuid::Uuid;

use crate::taxonomy::MemeCategory;
use crate::types::{MemeTopic, RedditPost, StorageError, TopicFilter};

const CREATE_TOPICS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS topics (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    category TEXT NOT NULL,
    subcategory_id TEXT,
    created_at INTEGER NOT NULL,
    trending_score REAL NOT NULL,
    is_active INTEGER NOT NULL
)
"#;

const CREATE_POSTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS posts (
    id TEXT PRIMARY KEY,
    source_id TEXT NOT NULL,
    image_url TEXT NOT NULL,
    title TEXT NOT NULL,
    popularity INTEGER NOT NULL,
    upvote_ratio REAL NOT NULL,
    source_url TEXT NOT NULL,
    created_at INTEGER NOT NULL,
    topic_id TEXT,
    source_name TEXT NOT NULL,
    FOREIGN KEY(topic_id) REFERENCES topics(id)
)
"#;

/// SQLite persistence for topics and their posts. Opened once per process;
/// the pool is kept for the process lifetime and tables are created if
/// absent. Callers are responsible for writing a topic before any post
/// that references it; `save_classified` does both in one transaction.
pub struct MemeStore {
    pool: SqlitePool,
}

impl MemeStore {
    pub async fn connect(database_url: &str) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(sqlx::Error::from)?
            .create_if_missing(true);
        // One process-wide handle; SQLite serializes writers anyway, and an
        // in-memory database is per-connection.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;

        sqlx::query(CREATE_TOPICS_TABLE).execute(&pool).await?;
        sqlx::query(CREATE_POSTS_TABLE).execute(&pool).await?;
        info!("Store ready at {}", database_url);

        Ok(Self { pool })
    }

    /// Insert-or-replace by topic id.
    pub async fn save_topic(&self, topic: &MemeTopic) -> Result<(), StorageError> {
        Self::insert_topic(&self.pool, topic).await
    }

    /// Insert-or-replace under a freshly generated id; returns that id.
    /// `topic_id` may be absent and is then recorded as null.
    pub async fn save_post(
        &self,
        post: &RedditPost,
        topic_id: Option<&str>,
    ) -> Result<String, StorageError> {
        Self::insert_post(&self.pool, post, topic_id).await
    }

    /// Writes a topic and the post that produced it in one transaction, so
    /// the logical foreign-key relationship holds even under failure.
    pub async fn save_classified(
        &self,
        topic: &MemeTopic,
        post: &RedditPost,
    ) -> Result<(), StorageError> {
        let mut tx = self.pool.begin().await?;
        Self::insert_topic(&mut *tx, topic).await?;
        Self::insert_post(&mut *tx, post, Some(&topic.id)).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Topics matching every provided filter, ordered by trending score
    /// descending.
    pub async fn get_topics(&self, filter: &TopicFilter) -> Result<Vec<MemeTopic>, StorageError> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT id, title, category, subcategory_id, created_at, trending_score, is_active \
             FROM topics WHERE 1 = 1",
        );
        if let Some(category) = filter.category {
            builder.push(" AND category = ").push_bind(category.as_str());
        }
        if let Some(subcategory_id) = &filter.subcategory_id {
            builder
                .push(" AND subcategory_id = ")
                .push_bind(subcategory_id.clone());
        }
        if let Some(is_active) = filter.is_active {
            builder.push(" AND is_active = ").push_bind(is_active);
        }
        builder.push(" ORDER BY trending_score DESC");

        let rows = builder.build().fetch_all(&self.pool).await?;
        let mut topics = Vec::with_capacity(rows.len());
        for row in rows {
            let category: String = row.try_get("category")?;
            topics.push(MemeTopic {
                id: row.try_get("id")?,
                title: row.try_get("title")?,
                category: MemeCategory::from_name(&category),
                subcategory_id: row.try_get("subcategory_id")?,
                created_at: row.try_get("created_at")?,
                trending_score: row.try_get("trending_score")?,
                is_active: row.try_get("is_active")?,
            });
        }

        debug!("get_topics returned {} rows", topics.len());
        Ok(topics)
    }

    /// All posts referencing `topic_id`, newest first.
    pub async fn get_posts_for_topic(
        &self,
        topic_id: &str,
    ) -> Result<Vec<RedditPost>, StorageError> {
        let rows = sqlx::query(
            "SELECT source_id, title, image_url, source_name, popularity, upvote_ratio, created_at \
             FROM posts WHERE topic_id = ? ORDER BY created_at DESC",
        )
        .bind(topic_id)
        .fetch_all(&self.pool)
        .await?;

        let mut posts = Vec::with_capacity(rows.len());
        for row in rows {
            let created_at: i64 = row.try_get("created_at")?;
            posts.push(RedditPost {
                id: row.try_get("source_id")?,
                title: row.try_get("title")?,
                url: row.try_get("image_url")?,
                subreddit: row.try_get("source_name")?,
                score: row.try_get("popularity")?,
                upvote_ratio: row.try_get("upvote_ratio")?,
                created_utc: created_at as f64,
            });
        }

        Ok(posts)
    }

    async fn insert_topic<'e, E>(executor: E, topic: &MemeTopic) -> Result<(), StorageError>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        sqlx::query(
            "INSERT OR REPLACE INTO topics \
             (id, title, category, subcategory_id, created_at, trending_score, is_active) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&topic.id)
        .bind(&topic.title)
        .bind(topic.category.as_str())
        .bind(&topic.subcategory_id)
        .bind(topic.created_at)
        .bind(topic.trending_score)
        .bind(topic.is_active)
        .execute(executor)
        .await?;
        Ok(())
    }

    async fn insert_post<'e, E>(
        executor: E,
        post: &RedditPost,
        topic_id: Option<&str>,
    ) -> Result<String, StorageError>
    where
        E: sqlx::Executor<'e, Database = Sqlite>,
    {
        let id = Uuid::new_v4().to_string();
        sqlx::query(
            "INSERT OR REPLACE INTO posts \
             (id, source_id, image_url, title, popularity, upvote_ratio, source_url, \
              created_at, topic_id, source_name) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&post.id)
        .bind(&post.url)
        .bind(&post.title)
        .bind(post.score)
        .bind(post.upvote_ratio)
        .bind(&post.url)
        .bind(post.created_utc as i64)
        .bind(topic_id)
        .bind(&post.subreddit)
        .execute(executor)
        .await?;
        Ok(id)
    }
}
