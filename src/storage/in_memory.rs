//! In-memory implementation of SocialStore for testing and development

use crate::core::entity::{Comment, EntityId, FollowEdge, NewComment, NewPost, Post, User};
use crate::core::error::StoreError;
use crate::core::store::{SocialStore, StoreResult};
use async_trait::async_trait;
use indexmap::IndexSet;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
struct Tables {
    last_user_id: EntityId,
    last_post_id: EntityId,
    last_comment_id: EntityId,
    users: BTreeMap<EntityId, User>,
    posts: BTreeMap<EntityId, Post>,
    comments: BTreeMap<EntityId, Comment>,
    // insertion order is the storage order for follower/followee listings
    follows: IndexSet<FollowEdge>,
}

impl Tables {
    fn users_for<'a>(&'a self, ids: impl Iterator<Item = EntityId> + 'a) -> Vec<User> {
        ids.filter_map(|id| self.users.get(&id).cloned()).collect()
    }
}

/// In-memory store implementation
///
/// Mirrors the relational schema: identifiers are assigned sequentially from 1
/// and never reused, emails and follow edges are unique, and references are
/// checked on insert and on removal (no cascading). All tables sit behind a
/// single `RwLock` so cross-table checks see a consistent snapshot.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    /// Create a new, empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|e| StoreError::backend(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|e| StoreError::backend(format!("Failed to acquire write lock: {}", e)))
    }
}

#[async_trait]
impl SocialStore for InMemoryStore {
    async fn insert_user(&self, email: &str) -> StoreResult<User> {
        let mut tables = self.write()?;

        if tables.users.values().any(|u| u.email == email) {
            return Err(StoreError::conflict(
                "user",
                format!("email '{}' is already registered", email),
            ));
        }

        tables.last_user_id += 1;
        let user = User {
            id: tables.last_user_id,
            email: email.to_string(),
        };
        tables.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn get_user(&self, id: EntityId) -> StoreResult<Option<User>> {
        Ok(self.read()?.users.get(&id).cloned())
    }

    async fn remove_user(&self, id: EntityId) -> StoreResult<bool> {
        let mut tables = self.write()?;

        if tables.posts.values().any(|p| p.user_id == id)
            || tables.comments.values().any(|c| c.user_id == id)
        {
            return Err(StoreError::constraint(
                "user",
                format!("user {} still owns posts or comments", id),
            ));
        }
        if tables
            .follows
            .iter()
            .any(|f| f.follower_id == id || f.followee_id == id)
        {
            return Err(StoreError::constraint(
                "user",
                format!("user {} still has follow relationships", id),
            ));
        }

        Ok(tables.users.remove(&id).is_some())
    }

    async fn follow(&self, follower_id: EntityId, followee_id: EntityId) -> StoreResult<()> {
        let mut tables = self.write()?;

        for id in [follower_id, followee_id] {
            if !tables.users.contains_key(&id) {
                return Err(StoreError::constraint(
                    "follow",
                    format!("user {} does not exist", id),
                ));
            }
        }

        if !tables.follows.insert(FollowEdge::new(follower_id, followee_id)) {
            return Err(StoreError::conflict(
                "follow",
                format!("user {} already follows user {}", follower_id, followee_id),
            ));
        }

        Ok(())
    }

    async fn unfollow(&self, follower_id: EntityId, followee_id: EntityId) -> StoreResult<bool> {
        let mut tables = self.write()?;
        Ok(tables
            .follows
            .shift_remove(&FollowEdge::new(follower_id, followee_id)))
    }

    async fn get_follower(
        &self,
        follower_id: EntityId,
        followee_id: EntityId,
    ) -> StoreResult<Option<User>> {
        let tables = self.read()?;

        if !tables
            .follows
            .contains(&FollowEdge::new(follower_id, followee_id))
        {
            return Ok(None);
        }

        Ok(tables.users.get(&follower_id).cloned())
    }

    async fn get_followers(&self, followee_id: EntityId) -> StoreResult<Vec<User>> {
        let tables = self.read()?;
        let ids = tables
            .follows
            .iter()
            .filter(|f| f.followee_id == followee_id)
            .map(|f| f.follower_id);

        Ok(tables.users_for(ids))
    }

    async fn get_followee(
        &self,
        followee_id: EntityId,
        follower_id: EntityId,
    ) -> StoreResult<Option<User>> {
        let tables = self.read()?;

        if !tables
            .follows
            .contains(&FollowEdge::new(follower_id, followee_id))
        {
            return Ok(None);
        }

        Ok(tables.users.get(&followee_id).cloned())
    }

    async fn get_followees(&self, follower_id: EntityId) -> StoreResult<Vec<User>> {
        let tables = self.read()?;
        let ids = tables
            .follows
            .iter()
            .filter(|f| f.follower_id == follower_id)
            .map(|f| f.followee_id);

        Ok(tables.users_for(ids))
    }

    async fn insert_post(&self, post: NewPost) -> StoreResult<Post> {
        let mut tables = self.write()?;

        if !tables.users.contains_key(&post.user_id) {
            return Err(StoreError::constraint(
                "post",
                format!("user {} does not exist", post.user_id),
            ));
        }

        tables.last_post_id += 1;
        let post = post.with_id(tables.last_post_id);
        tables.posts.insert(post.id, post.clone());

        Ok(post)
    }

    async fn remove_post(&self, id: EntityId) -> StoreResult<bool> {
        let mut tables = self.write()?;

        if tables.comments.values().any(|c| c.post_id == id) {
            return Err(StoreError::constraint(
                "post",
                format!("post {} still has comments", id),
            ));
        }

        Ok(tables.posts.remove(&id).is_some())
    }

    async fn get_post(&self, id: EntityId) -> StoreResult<Option<Post>> {
        Ok(self.read()?.posts.get(&id).cloned())
    }

    async fn get_post_for_user(
        &self,
        post_id: EntityId,
        user_id: EntityId,
    ) -> StoreResult<Option<Post>> {
        Ok(self
            .read()?
            .posts
            .get(&post_id)
            .filter(|p| p.user_id == user_id)
            .cloned())
    }

    async fn get_post_for_comment(
        &self,
        post_id: EntityId,
        comment_id: EntityId,
    ) -> StoreResult<Option<Post>> {
        let tables = self.read()?;

        let belongs = tables
            .comments
            .get(&comment_id)
            .is_some_and(|c| c.post_id == post_id);
        if !belongs {
            return Ok(None);
        }

        Ok(tables.posts.get(&post_id).cloned())
    }

    async fn get_posts_for_user(&self, user_id: EntityId) -> StoreResult<Vec<Post>> {
        Ok(self
            .read()?
            .posts
            .values()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert_comment(&self, comment: NewComment) -> StoreResult<Comment> {
        let mut tables = self.write()?;

        if !tables.users.contains_key(&comment.user_id) {
            return Err(StoreError::constraint(
                "comment",
                format!("user {} does not exist", comment.user_id),
            ));
        }
        if !tables.posts.contains_key(&comment.post_id) {
            return Err(StoreError::constraint(
                "comment",
                format!("post {} does not exist", comment.post_id),
            ));
        }

        tables.last_comment_id += 1;
        let comment = comment.with_id(tables.last_comment_id);
        tables.comments.insert(comment.id, comment.clone());

        Ok(comment)
    }

    async fn remove_comment(&self, id: EntityId) -> StoreResult<bool> {
        Ok(self.write()?.comments.remove(&id).is_some())
    }

    async fn get_comment_for_post(
        &self,
        comment_id: EntityId,
        post_id: EntityId,
    ) -> StoreResult<Option<Comment>> {
        Ok(self
            .read()?
            .comments
            .get(&comment_id)
            .filter(|c| c.post_id == post_id)
            .cloned())
    }

    async fn get_comments_for_post(&self, post_id: EntityId) -> StoreResult<Vec<Comment>> {
        Ok(self
            .read()?
            .comments
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect())
    }
}
