//! PostgreSQL storage backend using sqlx.
//!
//! Provides `PostgresStore`, a [`SocialStore`] backed by a `sqlx::PgPool`.
//!
//! # Feature flag
//!
//! This module is gated behind the `postgres` feature flag:
//! ```toml
//! [dependencies]
//! socialgraph = { version = "0.1", features = ["postgres"] }
//! ```
//!
//! # Schema
//!
//! Four tables: `users`, `posts`, `comments` and `followers`. Foreign keys are
//! declared without `ON DELETE CASCADE`, so removing a referenced row fails
//! with a constraint violation instead of deleting its dependents.

use crate::core::entity::{Comment, EntityId, NewComment, NewPost, Post, User};
use crate::core::error::StoreError;
use crate::core::store::{SocialStore, StoreResult};
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

// ---------------------------------------------------------------------------
// Schema management
// ---------------------------------------------------------------------------

/// Apply the required tables and indexes (idempotent).
///
/// Safe to call on every startup.
pub async fn ensure_schema(pool: &PgPool) -> StoreResult<()> {
    const STATEMENTS: &[&str] = &[
        "CREATE TABLE IF NOT EXISTS users (
            id BIGSERIAL PRIMARY KEY,
            email TEXT NOT NULL UNIQUE
        )",
        "CREATE TABLE IF NOT EXISTS posts (
            id BIGSERIAL PRIMARY KEY,
            user_id BIGINT NOT NULL REFERENCES users(id),
            title TEXT NOT NULL,
            body TEXT NOT NULL
        )",
        "CREATE INDEX IF NOT EXISTS idx_posts_user ON posts (user_id)",
        "CREATE TABLE IF NOT EXISTS comments (
            id BIGSERIAL PRIMARY KEY,
            user_id BIGINT NOT NULL REFERENCES users(id),
            post_id BIGINT NOT NULL REFERENCES posts(id),
            title TEXT NOT NULL,
            body TEXT NOT NULL
        )",
        "CREATE INDEX IF NOT EXISTS idx_comments_post ON comments (post_id)",
        "CREATE TABLE IF NOT EXISTS followers (
            seq BIGSERIAL,
            follower_id BIGINT NOT NULL REFERENCES users(id),
            followee_id BIGINT NOT NULL REFERENCES users(id),
            PRIMARY KEY (follower_id, followee_id)
        )",
        "CREATE INDEX IF NOT EXISTS idx_followers_followee ON followers (followee_id)",
    ];

    for statement in STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Row mapping
// ---------------------------------------------------------------------------

fn user_from_row(row: &PgRow) -> StoreResult<User> {
    Ok(User {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
    })
}

fn post_from_row(row: &PgRow) -> StoreResult<Post> {
    Ok(Post {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        title: row.try_get("title")?,
        body: row.try_get("body")?,
    })
}

fn comment_from_row(row: &PgRow) -> StoreResult<Comment> {
    Ok(Comment {
        id: row.try_get("id")?,
        user_id: row.try_get("user_id")?,
        post_id: row.try_get("post_id")?,
        title: row.try_get("title")?,
        body: row.try_get("body")?,
    })
}

/// Translate constraint violations into typed store errors
///
/// Unique violations (23505) become `Conflict`, foreign key violations (23503)
/// become `Constraint`; anything else stays a database error.
fn classify(entity: &'static str, err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        match db.code().as_deref() {
            Some("23505") => return StoreError::conflict(entity, db.message().to_string()),
            Some("23503") => return StoreError::constraint(entity, db.message().to_string()),
            _ => {}
        }
    }
    tracing::error!(entity, error = %err, "postgres operation failed");
    StoreError::Database(err)
}

// ---------------------------------------------------------------------------
// PostgresStore
// ---------------------------------------------------------------------------

/// Social graph storage backed by PostgreSQL.
///
/// # Example
///
/// ```rust,ignore
/// let store = PostgresStore::connect("postgres://localhost/social", 5).await?;
/// let user = store.insert_user("a@x.com").await?;
/// ```
#[derive(Clone, Debug)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new `PostgresStore` with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `url` and make sure the schema exists.
    pub async fn connect(url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await?;
        ensure_schema(&pool).await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn fetch_users(&self, sql: &str, id: EntityId) -> StoreResult<Vec<User>> {
        let rows = sqlx::query(sql)
            .bind(id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| classify("user", e))?;
        rows.iter().map(user_from_row).collect()
    }

    async fn fetch_user(&self, sql: &str, a: EntityId, b: EntityId) -> StoreResult<Option<User>> {
        let row = sqlx::query(sql)
            .bind(a)
            .bind(b)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| classify("user", e))?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn delete(&self, entity: &'static str, sql: &str, id: EntityId) -> StoreResult<bool> {
        let result = sqlx::query(sql)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| classify(entity, e))?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl SocialStore for PostgresStore {
    async fn insert_user(&self, email: &str) -> StoreResult<User> {
        let row = sqlx::query("INSERT INTO users (email) VALUES ($1) RETURNING id, email")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| classify("user", e))?;
        user_from_row(&row)
    }

    async fn get_user(&self, id: EntityId) -> StoreResult<Option<User>> {
        let row = sqlx::query("SELECT id, email FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| classify("user", e))?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn remove_user(&self, id: EntityId) -> StoreResult<bool> {
        self.delete("user", "DELETE FROM users WHERE id = $1", id)
            .await
    }

    async fn follow(&self, follower_id: EntityId, followee_id: EntityId) -> StoreResult<()> {
        sqlx::query("INSERT INTO followers (follower_id, followee_id) VALUES ($1, $2)")
            .bind(follower_id)
            .bind(followee_id)
            .execute(&self.pool)
            .await
            .map_err(|e| classify("follow", e))?;
        Ok(())
    }

    async fn unfollow(&self, follower_id: EntityId, followee_id: EntityId) -> StoreResult<bool> {
        let result =
            sqlx::query("DELETE FROM followers WHERE follower_id = $1 AND followee_id = $2")
                .bind(follower_id)
                .bind(followee_id)
                .execute(&self.pool)
                .await
                .map_err(|e| classify("follow", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn get_follower(
        &self,
        follower_id: EntityId,
        followee_id: EntityId,
    ) -> StoreResult<Option<User>> {
        self.fetch_user(
            "SELECT u.id, u.email
             FROM users AS u
             JOIN followers AS f ON u.id = f.follower_id
             WHERE f.follower_id = $1 AND f.followee_id = $2",
            follower_id,
            followee_id,
        )
        .await
    }

    async fn get_followers(&self, followee_id: EntityId) -> StoreResult<Vec<User>> {
        self.fetch_users(
            "SELECT u.id, u.email
             FROM users AS u
             JOIN followers AS f ON u.id = f.follower_id
             WHERE f.followee_id = $1
             ORDER BY f.seq",
            followee_id,
        )
        .await
    }

    async fn get_followee(
        &self,
        followee_id: EntityId,
        follower_id: EntityId,
    ) -> StoreResult<Option<User>> {
        self.fetch_user(
            "SELECT u.id, u.email
             FROM users AS u
             JOIN followers AS f ON u.id = f.followee_id
             WHERE f.followee_id = $1 AND f.follower_id = $2",
            followee_id,
            follower_id,
        )
        .await
    }

    async fn get_followees(&self, follower_id: EntityId) -> StoreResult<Vec<User>> {
        self.fetch_users(
            "SELECT u.id, u.email
             FROM users AS u
             JOIN followers AS f ON u.id = f.followee_id
             WHERE f.follower_id = $1
             ORDER BY f.seq",
            follower_id,
        )
        .await
    }

    async fn insert_post(&self, post: NewPost) -> StoreResult<Post> {
        let row = sqlx::query(
            "INSERT INTO posts (user_id, title, body) VALUES ($1, $2, $3)
             RETURNING id, user_id, title, body",
        )
        .bind(post.user_id)
        .bind(&post.title)
        .bind(&post.body)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify("post", e))?;
        post_from_row(&row)
    }

    async fn remove_post(&self, id: EntityId) -> StoreResult<bool> {
        self.delete("post", "DELETE FROM posts WHERE id = $1", id)
            .await
    }

    async fn get_post(&self, id: EntityId) -> StoreResult<Option<Post>> {
        let row = sqlx::query("SELECT id, user_id, title, body FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| classify("post", e))?;
        row.as_ref().map(post_from_row).transpose()
    }

    async fn get_post_for_user(
        &self,
        post_id: EntityId,
        user_id: EntityId,
    ) -> StoreResult<Option<Post>> {
        let row = sqlx::query(
            "SELECT id, user_id, title, body FROM posts WHERE id = $1 AND user_id = $2",
        )
        .bind(post_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| classify("post", e))?;
        row.as_ref().map(post_from_row).transpose()
    }

    async fn get_post_for_comment(
        &self,
        post_id: EntityId,
        comment_id: EntityId,
    ) -> StoreResult<Option<Post>> {
        let row = sqlx::query(
            "SELECT p.id, p.user_id, p.title, p.body
             FROM posts AS p
             JOIN comments AS c ON c.post_id = p.id
             WHERE p.id = $1 AND c.id = $2",
        )
        .bind(post_id)
        .bind(comment_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| classify("post", e))?;
        row.as_ref().map(post_from_row).transpose()
    }

    async fn get_posts_for_user(&self, user_id: EntityId) -> StoreResult<Vec<Post>> {
        let rows = sqlx::query(
            "SELECT id, user_id, title, body FROM posts WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| classify("post", e))?;
        rows.iter().map(post_from_row).collect()
    }

    async fn insert_comment(&self, comment: NewComment) -> StoreResult<Comment> {
        let row = sqlx::query(
            "INSERT INTO comments (user_id, post_id, title, body) VALUES ($1, $2, $3, $4)
             RETURNING id, user_id, post_id, title, body",
        )
        .bind(comment.user_id)
        .bind(comment.post_id)
        .bind(&comment.title)
        .bind(&comment.body)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify("comment", e))?;
        comment_from_row(&row)
    }

    async fn remove_comment(&self, id: EntityId) -> StoreResult<bool> {
        self.delete("comment", "DELETE FROM comments WHERE id = $1", id)
            .await
    }

    async fn get_comment_for_post(
        &self,
        comment_id: EntityId,
        post_id: EntityId,
    ) -> StoreResult<Option<Comment>> {
        let row = sqlx::query(
            "SELECT id, user_id, post_id, title, body
             FROM comments WHERE id = $1 AND post_id = $2",
        )
        .bind(comment_id)
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| classify("comment", e))?;
        row.as_ref().map(comment_from_row).transpose()
    }

    async fn get_comments_for_post(&self, post_id: EntityId) -> StoreResult<Vec<Comment>> {
        let rows = sqlx::query(
            "SELECT id, user_id, post_id, title, body
             FROM comments WHERE post_id = $1 ORDER BY id",
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| classify("comment", e))?;
        rows.iter().map(comment_from_row).collect()
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
