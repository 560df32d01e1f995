//! Macro-generated test suite for `SocialStore` contract validation.
//!
//! # Usage
//!
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//! use socialgraph::storage::InMemoryStore;
//!
//! social_store_tests!(InMemoryStore::new());
//! ```
//!
//! # Generated Tests
//!
//! ## Users
//! - `test_insert_and_get_user`: fresh id, same email on read-back
//! - `test_get_missing_user`: unknown id returns None
//! - `test_duplicate_email_conflicts`
//! - `test_remove_user`
//! - `test_remove_user_with_posts_is_rejected`
//!
//! ## Posts and comments
//! - `test_post_scoped_to_owner`: mismatched owner yields None
//! - `test_posts_for_user`: exact set, own ids, empty for no posts
//! - `test_post_requires_existing_user`
//! - `test_comment_scoped_to_post`
//! - `test_comments_for_post`
//! - `test_post_for_comment`
//!
//! ## Follows
//! - `test_follow_round_trip`
//! - `test_scoped_follower_and_followee`
//! - `test_duplicate_follow_conflicts`
//! - `test_self_follow_is_allowed`
//!
//! ## Concurrency
//! - `test_concurrent_inserts`: parallel inserts from spawned tasks get distinct ids

/// Generate a full `SocialStore` conformance test suite.
///
/// `$factory` must evaluate to a fresh, empty store. It is re-evaluated for
/// each test. For the concurrency test the store must also be `Clone + 'static`.
#[macro_export]
macro_rules! social_store_tests {
    ($factory:expr) => {
        mod social_store_contract_tests {
            use super::*;
            use socialgraph::core::entity::{NewComment, NewPost};
            use socialgraph::core::error::StoreError;
            use socialgraph::core::store::SocialStore;

            // ==================================================================
            // Users
            // ==================================================================

            #[tokio::test]
            async fn test_insert_and_get_user() {
                let store = $factory;

                let first = store.insert_user("a@x.com").await.unwrap();
                let second = store.insert_user("b@x.com").await.unwrap();
                assert_ne!(first.id, second.id, "ids must not be reused");

                let fetched = store.get_user(first.id).await.unwrap();
                assert_eq!(fetched.map(|u| u.email), Some("a@x.com".to_string()));
            }

            #[tokio::test]
            async fn test_get_missing_user() {
                let store = $factory;

                assert!(store.get_user(4242).await.unwrap().is_none());
            }

            #[tokio::test]
            async fn test_duplicate_email_conflicts() {
                let store = $factory;
                store.insert_user("a@x.com").await.unwrap();

                let err = store.insert_user("a@x.com").await.unwrap_err();
                assert!(
                    matches!(err, StoreError::Conflict { .. }),
                    "expected conflict, got {:?}",
                    err
                );
            }

            #[tokio::test]
            async fn test_remove_user() {
                let store = $factory;
                let carol = user(&store, "carol").await;

                assert!(store.remove_user(carol.id).await.unwrap());
                assert!(store.get_user(carol.id).await.unwrap().is_none());
                assert!(!store.remove_user(carol.id).await.unwrap());
            }

            #[tokio::test]
            async fn test_remove_user_with_posts_is_rejected() {
                let store = $factory;
                let fx = fixture(&store).await;

                let err = store.remove_user(fx.alice.id).await.unwrap_err();
                assert!(matches!(err, StoreError::Constraint { .. }));
                assert!(store.get_user(fx.alice.id).await.unwrap().is_some());
            }

            // ==================================================================
            // Posts
            // ==================================================================

            #[tokio::test]
            async fn test_post_scoped_to_owner() {
                let store = $factory;
                let fx = fixture(&store).await;
                let own = &fx.alice_posts[0];

                let found = store.get_post_for_user(own.id, fx.alice.id).await.unwrap();
                assert_eq!(found.as_ref(), Some(own));

                let foreign = store
                    .get_post_for_user(fx.bob_post.id, fx.alice.id)
                    .await
                    .unwrap();
                assert!(foreign.is_none(), "must never return another user's post");
            }

            #[tokio::test]
            async fn test_posts_for_user() {
                let store = $factory;
                let fx = fixture(&store).await;
                let carol = user(&store, "carol").await;

                let posts = store.get_posts_for_user(fx.alice.id).await.unwrap();
                assert_eq!(posts, fx.alice_posts);
                // each row carries its own id, not the owner's
                assert_ne!(posts[0].id, posts[1].id);

                let none = store.get_posts_for_user(carol.id).await.unwrap();
                assert!(none.is_empty());
            }

            #[tokio::test]
            async fn test_post_requires_existing_user() {
                let store = $factory;

                let err = store
                    .insert_post(NewPost::new(4242, "T", "B"))
                    .await
                    .unwrap_err();
                assert!(matches!(err, StoreError::Constraint { .. }));
            }

            // ==================================================================
            // Comments
            // ==================================================================

            #[tokio::test]
            async fn test_comment_scoped_to_post() {
                let store = $factory;
                let fx = fixture(&store).await;
                let on_first = comment(&store, &fx.bob, &fx.alice_posts[0], "nice").await;

                let found = store
                    .get_comment_for_post(on_first.id, fx.alice_posts[0].id)
                    .await
                    .unwrap();
                assert_eq!(found.as_ref(), Some(&on_first));

                let mismatched = store
                    .get_comment_for_post(on_first.id, fx.alice_posts[1].id)
                    .await
                    .unwrap();
                assert!(mismatched.is_none());
            }

            #[tokio::test]
            async fn test_comments_for_post() {
                let store = $factory;
                let fx = fixture(&store).await;
                let a = comment(&store, &fx.bob, &fx.alice_posts[0], "one").await;
                let b = comment(&store, &fx.alice, &fx.alice_posts[0], "two").await;
                comment(&store, &fx.alice, &fx.bob_post, "elsewhere").await;

                let comments = store
                    .get_comments_for_post(fx.alice_posts[0].id)
                    .await
                    .unwrap();
                assert_eq!(comments, vec![a, b]);

                let empty = store
                    .get_comments_for_post(fx.alice_posts[1].id)
                    .await
                    .unwrap();
                assert!(empty.is_empty());
            }

            #[tokio::test]
            async fn test_post_for_comment() {
                let store = $factory;
                let fx = fixture(&store).await;
                let c = comment(&store, &fx.bob, &fx.alice_posts[0], "nice").await;

                let own = store
                    .get_post_for_comment(fx.alice_posts[0].id, c.id)
                    .await
                    .unwrap();
                assert_eq!(own.as_ref(), Some(&fx.alice_posts[0]));

                let other = store
                    .get_post_for_comment(fx.bob_post.id, c.id)
                    .await
                    .unwrap();
                assert!(other.is_none());
            }

            #[tokio::test]
            async fn test_comment_requires_existing_post() {
                let store = $factory;
                let fx = fixture(&store).await;

                let err = store
                    .insert_comment(NewComment::new(fx.alice.id, 4242, "T", "B"))
                    .await
                    .unwrap_err();
                assert!(matches!(err, StoreError::Constraint { .. }));
            }

            // ==================================================================
            // Follows
            // ==================================================================

            #[tokio::test]
            async fn test_follow_round_trip() {
                let store = $factory;
                let fx = fixture(&store).await;
                let (a, b) = (&fx.alice, &fx.bob);

                store.follow(a.id, b.id).await.unwrap();
                assert_eq!(store.get_followees(a.id).await.unwrap(), vec![b.clone()]);
                assert_eq!(store.get_followers(b.id).await.unwrap(), vec![a.clone()]);
                assert!(store.get_followers(a.id).await.unwrap().is_empty());

                assert!(store.unfollow(a.id, b.id).await.unwrap());
                assert!(store.get_followees(a.id).await.unwrap().is_empty());
                assert!(store.get_followers(b.id).await.unwrap().is_empty());
            }

            #[tokio::test]
            async fn test_scoped_follower_and_followee() {
                let store = $factory;
                let fx = fixture(&store).await;
                let carol = user(&store, "carol").await;
                store.follow(fx.alice.id, fx.bob.id).await.unwrap();

                let follower = store.get_follower(fx.alice.id, fx.bob.id).await.unwrap();
                assert_eq!(follower.as_ref(), Some(&fx.alice));
                assert!(store
                    .get_follower(carol.id, fx.bob.id)
                    .await
                    .unwrap()
                    .is_none());

                let followee = store.get_followee(fx.bob.id, fx.alice.id).await.unwrap();
                assert_eq!(followee.as_ref(), Some(&fx.bob));
                assert!(store
                    .get_followee(fx.alice.id, fx.bob.id)
                    .await
                    .unwrap()
                    .is_none());
            }

            #[tokio::test]
            async fn test_followers_carry_their_own_ids() {
                let store = $factory;
                let fx = fixture(&store).await;
                let carol = user(&store, "carol").await;
                store.follow(fx.alice.id, carol.id).await.unwrap();
                store.follow(fx.bob.id, carol.id).await.unwrap();

                let ids: Vec<_> = store
                    .get_followers(carol.id)
                    .await
                    .unwrap()
                    .into_iter()
                    .map(|u| u.id)
                    .collect();
                assert_eq!(ids, vec![fx.alice.id, fx.bob.id]);
            }

            #[tokio::test]
            async fn test_duplicate_follow_conflicts() {
                let store = $factory;
                let fx = fixture(&store).await;
                store.follow(fx.alice.id, fx.bob.id).await.unwrap();

                let err = store.follow(fx.alice.id, fx.bob.id).await.unwrap_err();
                assert!(matches!(err, StoreError::Conflict { .. }));
            }

            #[tokio::test]
            async fn test_self_follow_is_allowed() {
                let store = $factory;
                let fx = fixture(&store).await;

                store.follow(fx.alice.id, fx.alice.id).await.unwrap();
                assert_eq!(
                    store.get_followers(fx.alice.id).await.unwrap(),
                    vec![fx.alice.clone()]
                );
            }

            // ==================================================================
            // Concurrency
            // ==================================================================

            #[tokio::test]
            async fn test_concurrent_inserts() {
                let store = $factory;

                let mut handles = Vec::new();
                for i in 0..10 {
                    let store = store.clone();
                    handles.push(tokio::spawn(async move {
                        store.insert_user(&format!("user{}@x.com", i)).await
                    }));
                }

                let mut ids = Vec::new();
                for handle in handles {
                    ids.push(handle.await.unwrap().unwrap().id);
                }
                ids.sort();
                ids.dedup();
                assert_eq!(ids.len(), 10, "every insert must get a distinct id");
            }
        }
    };
}
