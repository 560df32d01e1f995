//! `User` object: scalars plus post and follow relationships

use async_graphql::Value;
use async_graphql::dynamic::TypeRef;

use super::fields::{EntityFields, id_value};
use crate::core::entity::User;

/// Scalar fields of `User`
pub fn skeleton() -> EntityFields<User> {
    EntityFields::<User>::new("A registered account")
        .scalar("id", TypeRef::ID, |u| id_value(u.id))
        .scalar("email", TypeRef::STRING, |u| Value::from(u.email.clone()))
}

/// Attach post and follow relationships to `User`
pub fn relationships(fields: EntityFields<User>) -> EntityFields<User> {
    fields
        .has_one_by_id("post", "Post ID", |store, user, id| async move {
            store.get_post_for_user(id, user.id).await
        })
        .has_many("posts", |store, user| async move {
            store.get_posts_for_user(user.id).await
        })
        .has_one_by_id("follower", "Follower ID", |store, user, id| async move {
            store.get_follower(id, user.id).await
        })
        .has_many("followers", |store, user| async move {
            store.get_followers(user.id).await
        })
        .has_one_by_id("followee", "Followee ID", |store, user, id| async move {
            store.get_followee(id, user.id).await
        })
        .has_many("followees", |store, user| async move {
            store.get_followees(user.id).await
        })
}
