//! `Post` object: scalars plus author and comment relationships

use async_graphql::Value;
use async_graphql::dynamic::TypeRef;

use super::fields::{EntityFields, id_value};
use crate::core::entity::{GraphEntity, Post, User};

pub fn skeleton() -> EntityFields<Post> {
    EntityFields::<Post>::new("A post owned by one user")
        .scalar("id", TypeRef::ID, |p| id_value(p.id))
        .scalar("title", TypeRef::STRING, |p| Value::from(p.title.clone()))
        .scalar("body", TypeRef::STRING, |p| Value::from(p.body.clone()))
}

/// Attach the author and comment relationships to `Post`
///
/// `user` is non-null: a post whose author cannot be found nulls the nearest
/// nullable ancestor.
pub fn relationships(fields: EntityFields<Post>) -> EntityFields<Post> {
    fields
        .has_one(
            "user",
            TypeRef::named_nn(User::TYPE_NAME),
            |store, post| async move { store.get_user(post.user_id).await },
        )
        .has_one_by_id("comment", "Comment ID", |store, post, id| async move {
            store.get_comment_for_post(id, post.id).await
        })
        .has_many("comments", |store, post| async move {
            store.get_comments_for_post(post.id).await
        })
}
