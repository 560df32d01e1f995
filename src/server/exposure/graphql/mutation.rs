//! Mutation root: thin wrappers over single store writes

use async_graphql::dynamic::{Field, FieldFuture, FieldValue, InputValue, Object, TypeRef};
use validator::ValidateEmail;

use super::args::{coerce_id, required_string};
use super::fields::{field_error, store_handle};
use crate::core::entity::{Comment, GraphEntity, NewComment, NewPost, Post, User};
use crate::core::error::ResolveError;

pub const MUTATION: &str = "Mutation";

fn id_input(name: &str) -> InputValue {
    InputValue::new(name, TypeRef::named_nn(TypeRef::ID))
}

fn string_input(name: &str) -> InputValue {
    InputValue::new(name, TypeRef::named_nn(TypeRef::STRING))
}

fn create_user() -> Field {
    Field::new("createUser", TypeRef::named_nn(User::TYPE_NAME), |ctx| {
        FieldFuture::new(async move {
            let email = required_string(&ctx, "email").map_err(field_error)?;
            if !email.validate_email() {
                return Err(field_error(ResolveError::validation(
                    "email",
                    "not a valid email address",
                )));
            }

            let user = store_handle(&ctx)?
                .insert_user(&email)
                .await
                .map_err(field_error)?;
            tracing::info!(user_id = user.id, "user created");
            Ok(Some(FieldValue::owned_any(user)))
        })
    })
    .argument(string_input("email"))
}

fn remove_user() -> Field {
    Field::new("removeUser", TypeRef::named_nn(TypeRef::BOOLEAN), |ctx| {
        FieldFuture::new(async move {
            let id = coerce_id(&ctx, "id").map_err(field_error)?;
            let removed = store_handle(&ctx)?
                .remove_user(id)
                .await
                .map_err(field_error)?;
            tracing::info!(user_id = id, removed, "user removal");
            Ok(Some(FieldValue::value(removed)))
        })
    })
    .argument(id_input("id"))
}

fn follow() -> Field {
    Field::new("follow", TypeRef::named_nn(TypeRef::BOOLEAN), |ctx| {
        FieldFuture::new(async move {
            let follower_id = coerce_id(&ctx, "followerId").map_err(field_error)?;
            let followee_id = coerce_id(&ctx, "followeeId").map_err(field_error)?;
            store_handle(&ctx)?
                .follow(follower_id, followee_id)
                .await
                .map_err(field_error)?;
            tracing::info!(follower_id, followee_id, "follow recorded");
            Ok(Some(FieldValue::value(true)))
        })
    })
    .argument(id_input("followerId"))
    .argument(id_input("followeeId"))
}

fn unfollow() -> Field {
    Field::new("unfollow", TypeRef::named_nn(TypeRef::BOOLEAN), |ctx| {
        FieldFuture::new(async move {
            let follower_id = coerce_id(&ctx, "followerId").map_err(field_error)?;
            let followee_id = coerce_id(&ctx, "followeeId").map_err(field_error)?;
            let removed = store_handle(&ctx)?
                .unfollow(follower_id, followee_id)
                .await
                .map_err(field_error)?;
            tracing::info!(follower_id, followee_id, removed, "unfollow");
            Ok(Some(FieldValue::value(removed)))
        })
    })
    .argument(id_input("followerId"))
    .argument(id_input("followeeId"))
}

fn create_post() -> Field {
    Field::new("createPost", TypeRef::named_nn(Post::TYPE_NAME), |ctx| {
        FieldFuture::new(async move {
            let post = NewPost::new(
                coerce_id(&ctx, "userId").map_err(field_error)?,
                required_string(&ctx, "title").map_err(field_error)?,
                required_string(&ctx, "body").map_err(field_error)?,
            );
            let post = store_handle(&ctx)?
                .insert_post(post)
                .await
                .map_err(field_error)?;
            tracing::info!(post_id = post.id, user_id = post.user_id, "post created");
            Ok(Some(FieldValue::owned_any(post)))
        })
    })
    .argument(id_input("userId"))
    .argument(string_input("title"))
    .argument(string_input("body"))
}

fn remove_post() -> Field {
    Field::new("removePost", TypeRef::named_nn(TypeRef::BOOLEAN), |ctx| {
        FieldFuture::new(async move {
            let id = coerce_id(&ctx, "id").map_err(field_error)?;
            let removed = store_handle(&ctx)?
                .remove_post(id)
                .await
                .map_err(field_error)?;
            tracing::info!(post_id = id, removed, "post removal");
            Ok(Some(FieldValue::value(removed)))
        })
    })
    .argument(id_input("id"))
}

fn create_comment() -> Field {
    Field::new("createComment", TypeRef::named_nn(Comment::TYPE_NAME), |ctx| {
        FieldFuture::new(async move {
            let comment = NewComment::new(
                coerce_id(&ctx, "userId").map_err(field_error)?,
                coerce_id(&ctx, "postId").map_err(field_error)?,
                required_string(&ctx, "title").map_err(field_error)?,
                required_string(&ctx, "body").map_err(field_error)?,
            );
            let comment = store_handle(&ctx)?
                .insert_comment(comment)
                .await
                .map_err(field_error)?;
            tracing::info!(
                comment_id = comment.id,
                post_id = comment.post_id,
                "comment created"
            );
            Ok(Some(FieldValue::owned_any(comment)))
        })
    })
    .argument(id_input("userId"))
    .argument(id_input("postId"))
    .argument(string_input("title"))
    .argument(string_input("body"))
}

fn remove_comment() -> Field {
    Field::new("removeComment", TypeRef::named_nn(TypeRef::BOOLEAN), |ctx| {
        FieldFuture::new(async move {
            let id = coerce_id(&ctx, "id").map_err(field_error)?;
            let removed = store_handle(&ctx)?
                .remove_comment(id)
                .await
                .map_err(field_error)?;
            tracing::info!(comment_id = id, removed, "comment removal");
            Ok(Some(FieldValue::value(removed)))
        })
    })
    .argument(id_input("id"))
}

/// Build the mutation root
pub fn root() -> Object {
    Object::new(MUTATION)
        .field(create_user())
        .field(remove_user())
        .field(follow())
        .field(unfollow())
        .field(create_post())
        .field(remove_post())
        .field(create_comment())
        .field(remove_comment())
}
