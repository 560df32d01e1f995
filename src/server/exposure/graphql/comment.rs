use async_graphql::Value;
use async_graphql::dynamic::TypeRef;

use super::fields::{EntityFields, id_value};
use crate::core::entity::{Comment, GraphEntity, User};

pub fn skeleton() -> EntityFields<Comment> {
    EntityFields::<Comment>::new("A comment written by a user on a post")
        .scalar("id", TypeRef::ID, |c| id_value(c.id))
        .scalar("title", TypeRef::STRING, |c| Value::from(c.title.clone()))
        .scalar("body", TypeRef::STRING, |c| Value::from(c.body.clone()))
}

/// Attach the author and post relationships to `Comment`
///
/// `post(id)` resolves only when `id` is the post this comment belongs to.
pub fn relationships(fields: EntityFields<Comment>) -> EntityFields<Comment> {
    fields
        .has_one(
            "user",
            TypeRef::named(User::TYPE_NAME),
            |store, comment| async move { store.get_user(comment.user_id).await },
        )
        .has_one_by_id("post", "Post ID", |store, comment, id| async move {
            store.get_post_for_comment(id, comment.id).await
        })
}
