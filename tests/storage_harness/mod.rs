//! Shared test harness for storage backend testing
//!
//! Provides seeding helpers and the `social_store_tests!` contract suite.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod social_store_tests;

use socialgraph::core::entity::{Comment, NewComment, NewPost, Post, User};
use socialgraph::core::store::SocialStore;

/// Two users, where `alice` owns two posts and `bob` owns one
pub struct Fixture {
    pub alice: User,
    pub bob: User,
    pub alice_posts: Vec<Post>,
    pub bob_post: Post,
}

/// Insert a user with a unique email derived from `name`
pub async fn user(store: &impl SocialStore, name: &str) -> User {
    store
        .insert_user(&format!("{}@example.com", name))
        .await
        .expect("insert user")
}

pub async fn post(store: &impl SocialStore, owner: &User, title: &str) -> Post {
    store
        .insert_post(NewPost::new(owner.id, title, format!("{} body", title)))
        .await
        .expect("insert post")
}

pub async fn comment(store: &impl SocialStore, author: &User, on: &Post, title: &str) -> Comment {
    store
        .insert_comment(NewComment::new(author.id, on.id, title, "comment body"))
        .await
        .expect("insert comment")
}

pub async fn fixture(store: &impl SocialStore) -> Fixture {
    let alice = user(store, "alice").await;
    let bob = user(store, "bob").await;
    let first = post(store, &alice, "first").await;
    let second = post(store, &alice, "second").await;
    let bob_post = post(store, &bob, "bob's").await;

    Fixture {
        alice,
        bob,
        alice_posts: vec![first, second],
        bob_post,
    }
}
