//! Data-access trait consumed by the field resolvers

use crate::core::entity::{Comment, EntityId, NewComment, NewPost, Post, User};
use crate::core::error::StoreError;
use async_trait::async_trait;
use std::sync::Arc;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Store handle shared by the server and every resolver
pub type SharedStore = Arc<dyn SocialStore>;

/// Storage operations backing the graph
///
/// Point lookups return `Ok(None)` when nothing matches; collection lookups
/// return an empty `Vec`. Scoped lookups (`*_for_*`, `get_follower`,
/// `get_followee`) must apply both identifiers inside the query itself so a
/// mismatched pair can never yield another parent's child.
///
/// Implementations must tolerate concurrent calls from independent queries.
#[async_trait]
pub trait SocialStore: Send + Sync {
    /// Insert a user, assigning a fresh identifier
    async fn insert_user(&self, email: &str) -> StoreResult<User>;

    async fn get_user(&self, id: EntityId) -> StoreResult<Option<User>>;

    /// Remove a user; returns whether a row was removed
    async fn remove_user(&self, id: EntityId) -> StoreResult<bool>;

    /// Record that `follower_id` follows `followee_id`
    async fn follow(&self, follower_id: EntityId, followee_id: EntityId) -> StoreResult<()>;

    /// Remove a follow edge; returns whether an edge was removed
    async fn unfollow(&self, follower_id: EntityId, followee_id: EntityId) -> StoreResult<bool>;

    /// User `follower_id`, only if they follow `followee_id`
    async fn get_follower(
        &self,
        follower_id: EntityId,
        followee_id: EntityId,
    ) -> StoreResult<Option<User>>;

    /// Every user following `followee_id`
    async fn get_followers(&self, followee_id: EntityId) -> StoreResult<Vec<User>>;

    /// User `followee_id`, only if `follower_id` follows them
    async fn get_followee(
        &self,
        followee_id: EntityId,
        follower_id: EntityId,
    ) -> StoreResult<Option<User>>;

    /// Every user followed by `follower_id`
    async fn get_followees(&self, follower_id: EntityId) -> StoreResult<Vec<User>>;

    async fn insert_post(&self, post: NewPost) -> StoreResult<Post>;

    async fn remove_post(&self, id: EntityId) -> StoreResult<bool>;

    async fn get_post(&self, id: EntityId) -> StoreResult<Option<Post>>;

    /// Post `post_id`, only if owned by `user_id`
    async fn get_post_for_user(
        &self,
        post_id: EntityId,
        user_id: EntityId,
    ) -> StoreResult<Option<Post>>;

    /// Post `post_id`, only if comment `comment_id` belongs to it
    async fn get_post_for_comment(
        &self,
        post_id: EntityId,
        comment_id: EntityId,
    ) -> StoreResult<Option<Post>>;

    async fn get_posts_for_user(&self, user_id: EntityId) -> StoreResult<Vec<Post>>;

    async fn insert_comment(&self, comment: NewComment) -> StoreResult<Comment>;

    async fn remove_comment(&self, id: EntityId) -> StoreResult<bool>;

    /// Comment `comment_id`, only if it belongs to post `post_id`
    async fn get_comment_for_post(
        &self,
        comment_id: EntityId,
        post_id: EntityId,
    ) -> StoreResult<Option<Comment>>;

    async fn get_comments_for_post(&self, post_id: EntityId) -> StoreResult<Vec<Comment>>;

    /// Release backend resources; called once at shutdown
    async fn close(&self) {}
}
