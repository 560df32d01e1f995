//! Typed resolver tables for entity objects
//!
//! An [`EntityFields<E>`] collects every field of the GraphQL object backing
//! entity `E`. Resolvers registered on it receive the parent as `&E` (or an
//! owned `E` for relationships); the downcast from the engine's erased parent
//! value happens in exactly one place, [`source`], keyed by `E`.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use async_graphql::dynamic::{
    Field, FieldFuture, FieldValue, InputValue, Object, ResolverContext, TypeRef,
};
use async_graphql::{ErrorExtensions, Value};

use super::args::coerce_id;
use crate::core::entity::{EntityId, GraphEntity};
use crate::core::error::ResolveError;
use crate::core::store::{SharedStore, StoreResult};

/// Borrow the parent record as `E`
///
/// A parent of any other kind yields `None`; callers resolve to "no value"
/// rather than failing the query.
pub fn source<'a, E: GraphEntity>(parent: &'a FieldValue<'_>, field: &str) -> Option<&'a E> {
    let source = parent.downcast_ref::<E>();
    if source.is_none() {
        tracing::warn!(
            expected = E::TYPE_NAME,
            field,
            "resolver invoked with a source of another kind"
        );
    }
    source
}

/// Fetch the store handle injected as schema data
pub fn store_handle(ctx: &ResolverContext<'_>) -> async_graphql::Result<SharedStore> {
    Ok(ctx.data::<SharedStore>()?.clone())
}

/// Convert a resolver failure into a GraphQL field error carrying its code
pub fn field_error(err: impl Into<ResolveError>) -> async_graphql::Error {
    let err: ResolveError = err.into();
    err.extend()
}

/// Record a resolver failure at the path of the field being resolved
///
/// The engine keeps no path for errors returned from a resolver, and drops
/// the field from the response. Fields that recover from a failure (null or
/// an empty list) report it through here instead, so the error still points
/// at the field and its siblings keep their values.
pub fn record_error(ctx: &ResolverContext<'_>, err: impl Into<ResolveError>) {
    let err: ResolveError = err.into();
    tracing::debug!(code = err.error_code(), error = %err, "field failed");
    ctx.add_error(ctx.set_error_path(err.extend().into_server_error(ctx.item.pos)));
}

/// Settle a nullable field: a failure is recorded and the field becomes null
pub fn or_null<T>(ctx: &ResolverContext<'_>, result: Result<Option<T>, ResolveError>) -> Option<T> {
    result.unwrap_or_else(|err| {
        record_error(ctx, err);
        None
    })
}

/// Render an identifier the way `ID` values are serialized
pub fn id_value(id: EntityId) -> Value {
    Value::from(id.to_string())
}

fn id_argument(description: &str) -> InputValue {
    InputValue::new("id", TypeRef::named_nn(TypeRef::ID)).description(description)
}

/// Field table of the object type exposing `E`
pub struct EntityFields<E: GraphEntity> {
    object: Object,
    #[cfg(test)]
    names: Vec<&'static str>,
    _entity: PhantomData<fn(&E)>,
}

impl<E: GraphEntity> EntityFields<E> {
    pub fn new(description: &str) -> Self {
        Self {
            object: Object::new(E::TYPE_NAME).description(description),
            #[cfg(test)]
            names: Vec::new(),
            _entity: PhantomData,
        }
    }

    #[cfg_attr(not(test), allow(unused_variables))]
    fn push(mut self, name: &'static str, field: Field) -> Self {
        #[cfg(test)]
        self.names.push(name);
        self.object = self.object.field(field);
        self
    }

    /// Names of the fields declared so far, in declaration order
    #[cfg(test)]
    pub fn field_names(&self) -> &[&'static str] {
        &self.names
    }

    /// Declare a non-null scalar read straight from the record
    pub fn scalar(self, name: &'static str, ty: &'static str, extract: fn(&E) -> Value) -> Self {
        let field = Field::new(name, TypeRef::named_nn(ty), move |ctx| {
            FieldFuture::new(async move {
                Ok(source::<E>(ctx.parent_value, name).map(|e| FieldValue::value(extract(e))))
            })
        });
        self.push(name, field)
    }

    /// Declare a singular relationship derived from the parent alone
    ///
    /// `ty` carries the declared nullability; a not-found child resolves to null.
    /// A store failure on a nullable field is recorded and resolves to null; on
    /// a non-null field it fails the field.
    pub fn has_one<T, F, Fut>(self, name: &'static str, ty: TypeRef, fetch: F) -> Self
    where
        T: GraphEntity,
        F: Fn(SharedStore, E) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = StoreResult<Option<T>>> + Send + 'static,
    {
        let nullable = !matches!(ty, TypeRef::NonNull(_));
        let fetch = Arc::new(fetch);
        let field = Field::new(name, ty, move |ctx| {
            let fetch = fetch.clone();
            FieldFuture::new(async move {
                let Some(parent) = source::<E>(ctx.parent_value, name) else {
                    return Ok(None);
                };
                let store = store_handle(&ctx)?;
                tracing::debug!(
                    parent = E::TYPE_NAME,
                    parent_id = parent.id(),
                    field = name,
                    "resolving relationship"
                );

                let child = match fetch(store, parent.clone()).await {
                    Ok(child) => child,
                    Err(err) if nullable => {
                        record_error(&ctx, err);
                        None
                    }
                    Err(err) => return Err(field_error(err)),
                };
                Ok(child.map(FieldValue::owned_any))
            })
        });
        self.push(name, field)
    }

    /// Declare a nullable singular relationship selected by an `id: ID!` argument
    ///
    /// `fetch` receives the coerced target id and must scope the lookup by the
    /// parent as well. An invalid id or a store failure is recorded and the
    /// field resolves to null.
    pub fn has_one_by_id<T, F, Fut>(self, name: &'static str, description: &str, fetch: F) -> Self
    where
        T: GraphEntity,
        F: Fn(SharedStore, E, EntityId) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = StoreResult<Option<T>>> + Send + 'static,
    {
        let fetch = Arc::new(fetch);
        let field = Field::new(name, TypeRef::named(T::TYPE_NAME), move |ctx| {
            let fetch = fetch.clone();
            FieldFuture::new(async move {
                let Some(parent) = source::<E>(ctx.parent_value, name) else {
                    return Ok(None);
                };
                let id = match coerce_id(&ctx, "id") {
                    Ok(id) => id,
                    Err(err) => {
                        record_error(&ctx, err);
                        return Ok(None);
                    }
                };
                let store = store_handle(&ctx)?;
                tracing::debug!(
                    parent = E::TYPE_NAME,
                    parent_id = parent.id(),
                    field = name,
                    target_id = id,
                    "resolving scoped relationship"
                );

                let child = fetch(store, parent.clone(), id).await.map_err(Into::into);
                Ok(or_null(&ctx, child).map(FieldValue::owned_any))
            })
        })
        .argument(id_argument(description));
        self.push(name, field)
    }

    /// Declare a `[T!]!` relationship scoped by the parent id
    ///
    /// Always yields a list; a parent of another kind yields an empty one. A
    /// store failure is recorded at this field and leaves an empty list in
    /// place.
    pub fn has_many<T, F, Fut>(self, name: &'static str, fetch: F) -> Self
    where
        T: GraphEntity,
        F: Fn(SharedStore, E) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = StoreResult<Vec<T>>> + Send + 'static,
    {
        let fetch = Arc::new(fetch);
        let field = Field::new(name, TypeRef::named_nn_list_nn(T::TYPE_NAME), move |ctx| {
            let fetch = fetch.clone();
            FieldFuture::new(async move {
                let Some(parent) = source::<E>(ctx.parent_value, name) else {
                    return Ok(Some(FieldValue::list(Vec::<FieldValue>::new())));
                };
                let store = store_handle(&ctx)?;
                tracing::debug!(
                    parent = E::TYPE_NAME,
                    parent_id = parent.id(),
                    field = name,
                    "resolving collection"
                );

                let children = fetch(store, parent.clone()).await.unwrap_or_else(|err| {
                    record_error(&ctx, err);
                    Vec::new()
                });
                Ok(Some(FieldValue::list(
                    children.into_iter().map(FieldValue::owned_any),
                )))
            })
        });
        self.push(name, field)
    }

    pub fn finish(self) -> Object {
        self.object
    }
}
