//! Entity records served by the graph
//!
//! Every entity is an immutable snapshot of a storage row. Resolving a
//! relationship yields a fresh copy of the child, never a live reference
//! back into the parent.

use serde::{Deserialize, Serialize};

/// Storage-assigned identifier shared by every entity table
pub type EntityId = i64;

/// Marker for record types that can appear as the source of a field resolver
///
/// The associated name is the GraphQL object type the record is exposed as.
pub trait GraphEntity: Clone + Send + Sync + 'static {
    /// GraphQL object type name
    const TYPE_NAME: &'static str;

    /// Identifier of this record
    fn id(&self) -> EntityId;
}

/// A registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: EntityId,
    pub email: String,
}

/// A post owned by exactly one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: EntityId,
    pub user_id: EntityId,
    pub title: String,
    pub body: String,
}

/// A comment written by a user on a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: EntityId,
    pub user_id: EntityId,
    pub post_id: EntityId,
    pub title: String,
    pub body: String,
}

/// Directed follow relationship between two users
///
/// Unique per ordered pair; `follower_id == followee_id` is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FollowEdge {
    pub follower_id: EntityId,
    pub followee_id: EntityId,
}

impl FollowEdge {
    pub fn new(follower_id: EntityId, followee_id: EntityId) -> Self {
        Self {
            follower_id,
            followee_id,
        }
    }
}

/// Fields required to insert a post; the id is assigned by storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub user_id: EntityId,
    pub title: String,
    pub body: String,
}

impl NewPost {
    pub fn new(user_id: EntityId, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            user_id,
            title: title.into(),
            body: body.into(),
        }
    }

    pub(crate) fn with_id(self, id: EntityId) -> Post {
        Post {
            id,
            user_id: self.user_id,
            title: self.title,
            body: self.body,
        }
    }
}

/// Fields required to insert a comment; the id is assigned by storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    pub user_id: EntityId,
    pub post_id: EntityId,
    pub title: String,
    pub body: String,
}

impl NewComment {
    pub fn new(
        user_id: EntityId,
        post_id: EntityId,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            user_id,
            post_id,
            title: title.into(),
            body: body.into(),
        }
    }

    pub(crate) fn with_id(self, id: EntityId) -> Comment {
        Comment {
            id,
            user_id: self.user_id,
            post_id: self.post_id,
            title: self.title,
            body: self.body,
        }
    }
}

impl GraphEntity for User {
    const TYPE_NAME: &'static str = "User";

    fn id(&self) -> EntityId {
        self.id
    }
}

impl GraphEntity for Post {
    const TYPE_NAME: &'static str = "Post";

    fn id(&self) -> EntityId {
        self.id
    }
}

impl GraphEntity for Comment {
    const TYPE_NAME: &'static str = "Comment";

    fn id(&self) -> EntityId {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_post_keeps_fields_when_assigned_id() {
        let post = NewPost::new(3, "Title", "Body").with_id(7);

        assert_eq!(post.id, 7);
        assert_eq!(post.user_id, 3);
        assert_eq!(post.title, "Title");
        assert_eq!(post.body, "Body");
    }

    #[test]
    fn test_new_comment_keeps_fields_when_assigned_id() {
        let comment = NewComment::new(1, 2, "Hi", "there").with_id(9);

        assert_eq!(comment.id, 9);
        assert_eq!(comment.user_id, 1);
        assert_eq!(comment.post_id, 2);
    }

    #[test]
    fn test_type_names() {
        assert_eq!(User::TYPE_NAME, "User");
        assert_eq!(Post::TYPE_NAME, "Post");
        assert_eq!(Comment::TYPE_NAME, "Comment");
    }

    #[test]
    fn test_self_follow_edge_is_representable() {
        let edge = FollowEdge::new(4, 4);
        assert_eq!(edge.follower_id, edge.followee_id);
    }
}
