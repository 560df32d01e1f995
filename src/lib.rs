//! # socialgraph
//!
//! Users, posts, comments and follow relationships exposed through a GraphQL
//! API whose relationships are resolved on demand.
//!
//! ## Features
//!
//! - **Lazy relationships**: `User.posts`, `Post.comments`, `User.followers`, ...
//!   each fetch their children only when the query selects them
//! - **Scoped lookups**: `user { post(id: ..) }` never returns another user's post
//! - **Typed resolver tables**: every field is bound to exactly one entity type
//! - **Pluggable storage**: in-memory by default, PostgreSQL behind `postgres`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use socialgraph::prelude::*;
//!
//! let store = Arc::new(InMemoryStore::new());
//! let alice = store.insert_user("alice@example.com").await?;
//! store.insert_post(NewPost::new(alice.id, "Hello", "First post")).await?;
//!
//! let host = ServerHost::new(store)?;
//! let response = host
//!     .execute(r#"{ user(id: "1") { posts { title } } }"#, None)
//!     .await;
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        Comment, EntityId, FollowEdge, GraphEntity, NewComment, NewPost, Post, ResolveError,
        SharedStore, SocialStore, StoreError, StoreResult, User,
    };

    // === Storage ===
    pub use crate::storage::InMemoryStore;
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresStore;

    // === Config ===
    pub use crate::config::{AppConfig, LogConfig, ServerConfig, StorageConfig};

    // === Server ===
    pub use crate::server::{GraphQLExposure, RestExposure, ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use std::sync::Arc;
}
