//! Schema assembly
//!
//! The schema is built in phases so no object type ever refers to one that
//! has not been declared yet:
//!
//! 1. declare the scalar skeleton of every entity type
//! 2. attach relationship fields, now that all target types exist
//! 3. register the entity objects and the roots, inject the store, finish

use async_graphql::dynamic::{
    Field, FieldFuture, FieldValue, InputValue, Object, Schema, SchemaError, TypeRef,
};

use super::args::coerce_id;
use super::fields::{EntityFields, or_null, store_handle};
use super::{comment, mutation, post, user};
use crate::core::entity::{Comment, GraphEntity, Post, User};
use crate::core::error::ResolveError;
use crate::core::store::SharedStore;

pub const QUERY: &str = "Query";

/// Field tables of every entity type, shared by the build phases
struct EntityTypes {
    user: EntityFields<User>,
    post: EntityFields<Post>,
    comment: EntityFields<Comment>,
}

impl EntityTypes {
    fn declare() -> Self {
        Self {
            user: user::skeleton(),
            post: post::skeleton(),
            comment: comment::skeleton(),
        }
    }

    fn attach_relationships(self) -> Self {
        Self {
            user: user::relationships(self.user),
            post: post::relationships(self.post),
            comment: comment::relationships(self.comment),
        }
    }

    fn into_objects(self) -> [Object; 3] {
        [
            self.user.finish(),
            self.post.finish(),
            self.comment.finish(),
        ]
    }
}

fn query_root() -> Object {
    Object::new(QUERY)
        .field(
            Field::new("user", TypeRef::named(User::TYPE_NAME), |ctx| {
                FieldFuture::new(async move {
                    let store = store_handle(&ctx)?;
                    let user = match coerce_id(&ctx, "id") {
                        Ok(id) => store.get_user(id).await.map_err(ResolveError::from),
                        Err(err) => Err(err),
                    };
                    Ok(or_null(&ctx, user).map(FieldValue::owned_any))
                })
            })
            .argument(InputValue::new("id", TypeRef::named_nn(TypeRef::ID)).description("User ID")),
        )
        .field(
            Field::new("post", TypeRef::named(Post::TYPE_NAME), |ctx| {
                FieldFuture::new(async move {
                    let store = store_handle(&ctx)?;
                    let post = match coerce_id(&ctx, "id") {
                        Ok(id) => store.get_post(id).await.map_err(ResolveError::from),
                        Err(err) => Err(err),
                    };
                    Ok(or_null(&ctx, post).map(FieldValue::owned_any))
                })
            })
            .argument(InputValue::new("id", TypeRef::named_nn(TypeRef::ID)).description("Post ID")),
        )
}

/// Build the executable schema around an injected store handle
pub fn build_schema(store: SharedStore) -> Result<Schema, SchemaError> {
    let types = EntityTypes::declare().attach_relationships();

    let mut builder = Schema::build(QUERY, Some(mutation::MUTATION), None)
        .register(query_root())
        .register(mutation::root());
    for object in types.into_objects() {
        builder = builder.register(object);
    }

    builder.data(store).finish()
}
