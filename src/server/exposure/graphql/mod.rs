//! GraphQL API exposure
//!
//! The entity objects, their relationship resolvers and the roots live in the
//! submodules; this module wires the resulting schema into an Axum router.

mod args;
mod comment;
mod fields;
mod mutation;
mod post;
mod schema;
mod user;

pub use args::{coerce_id, parse_id};
pub use schema::{QUERY, build_schema};

use crate::server::host::ServerHost;
use anyhow::Result;
use async_graphql::http::{GraphQLPlaygroundConfig, playground_source};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Router,
    extract::Extension,
    response::{Html, IntoResponse},
    routing::{get, post},
};
use std::sync::Arc;

/// GraphQL API exposure implementation
pub struct GraphQLExposure;

impl GraphQLExposure {
    /// Build the GraphQL router from a host
    ///
    /// Returns a router with:
    /// - `POST /graphql`: query and mutation endpoint
    /// - `GET /graphql/schema`: SDL export
    /// - `GET /graphql/playground`: playground UI, when enabled on the host
    pub fn build_router(host: Arc<ServerHost>) -> Result<Router> {
        let mut router = Router::new()
            .route("/graphql", post(graphql_handler))
            .route("/graphql/schema", get(graphql_schema));

        if host.playground {
            router = router.route("/graphql/playground", get(graphql_playground));
        }

        Ok(router.layer(Extension(host)))
    }
}

/// Handler for GraphQL queries and mutations
async fn graphql_handler(
    Extension(host): Extension<Arc<ServerHost>>,
    request: GraphQLRequest,
) -> GraphQLResponse {
    host.schema.execute(request.into_inner()).await.into()
}

/// Handler for GraphQL playground UI
async fn graphql_playground() -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new("/graphql")))
}

/// Handler for GraphQL schema SDL export
async fn graphql_schema(Extension(host): Extension<Arc<ServerHost>>) -> impl IntoResponse {
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; charset=utf-8",
        )],
        host.sdl(),
    )
}
