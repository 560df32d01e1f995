//! Core module containing the entity records, errors and storage contract

pub mod entity;
pub mod error;
pub mod store;

pub use entity::{Comment, EntityId, FollowEdge, GraphEntity, NewComment, NewPost, Post, User};
pub use error::{ResolveError, StoreError};
pub use store::{SharedStore, SocialStore, StoreResult};
