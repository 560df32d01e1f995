//! Server host for transport-agnostic query execution
//!
//! `ServerHost` owns the store handle and the schema built around it. Any
//! exposure (HTTP, tests, embedding applications) executes queries through it.

use crate::core::store::SharedStore;
use crate::server::exposure::graphql::build_schema;
use anyhow::Result;
use async_graphql::dynamic::Schema;
use async_graphql::{Request, Response, Variables};

/// Host context containing the schema and the store it resolves against
///
/// # Example
///
/// ```rust,ignore
/// let host = ServerHost::new(Arc::new(InMemoryStore::new()))?;
/// let response = host.execute("{ user(id: 1) { email } }", None).await;
/// ```
pub struct ServerHost {
    /// Store handle injected into every resolver
    pub store: SharedStore,

    /// Executable schema
    pub schema: Schema,

    /// Whether the GraphQL playground is served
    pub playground: bool,
}

impl ServerHost {
    /// Build the schema around `store`
    pub fn new(store: SharedStore) -> Result<Self> {
        let schema = build_schema(store.clone())?;

        Ok(Self {
            store,
            schema,
            playground: true,
        })
    }

    pub fn with_playground(mut self, enabled: bool) -> Self {
        self.playground = enabled;
        self
    }

    /// Execute one query document with an optional JSON variables map
    ///
    /// The response always carries the partial `data` alongside any
    /// field-level `errors`.
    pub async fn execute(&self, query: &str, variables: Option<serde_json::Value>) -> Response {
        let mut request = Request::new(query);
        if let Some(variables) = variables {
            request = request.variables(Variables::from_json(variables));
        }
        self.schema.execute(request).await
    }

    /// Schema in SDL form
    pub fn sdl(&self) -> String {
        self.schema.sdl()
    }

    /// Release the store; called once when the server stops
    pub async fn shutdown(&self) {
        self.store.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::SocialStore;
    use crate::storage::InMemoryStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_execute_returns_null_for_missing_user() {
        let host = ServerHost::new(Arc::new(InMemoryStore::new())).unwrap();

        let response = host.execute("{ user(id: \"1\") { email } }", None).await;

        assert!(response.errors.is_empty());
        assert_eq!(
            response.data.into_json().unwrap(),
            serde_json::json!({ "user": null })
        );
    }

    #[tokio::test]
    async fn test_execute_binds_variables() {
        let store = Arc::new(InMemoryStore::new());
        let host = ServerHost::new(store.clone()).unwrap();
        store.insert_user("a@x.com").await.unwrap();

        let response = host
            .execute(
                "query($id: ID!) { user(id: $id) { id email } }",
                Some(serde_json::json!({ "id": "1" })),
            )
            .await;

        assert!(response.errors.is_empty());
        assert_eq!(
            response.data.into_json().unwrap(),
            serde_json::json!({ "user": { "id": "1", "email": "a@x.com" } })
        );
    }

    #[test]
    fn test_sdl_exposes_entity_types() {
        let host = ServerHost::new(Arc::new(InMemoryStore::new())).unwrap();
        let sdl = host.sdl();

        assert!(sdl.contains("type User"));
        assert!(sdl.contains("type Post"));
        assert!(sdl.contains("type Comment"));
    }
}
