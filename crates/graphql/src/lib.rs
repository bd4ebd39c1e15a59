//! GraphQL API for the Traveller backend.
//!
//! Exposes every entity kind as a Relay connection and resolves global
//! IDs through `node` / `nodes`.
//!
//! # Building a Schema
//!
//! ```ignore
//! use traveller_graphql::{build_schema, RelayConfig};
//!
//! let schema = build_schema(repositories, RelayConfig::default());
//! serve_with_shutdown(schema, ServerConfig::default(), shutdown).await?;
//! ```

mod connection;
mod schema;
mod server;
mod types;

pub use connection::PageInfo;
pub use schema::{
    build_node_registry, build_schema, schema_builder, NodeLookup, QueryRoot, RelayConfig,
    MAX_NODES_PER_REQUEST, MAX_QUERY_COMPLEXITY, MAX_QUERY_DEPTH,
};
pub use server::{router, serve_with_shutdown, ServerConfig};
pub use types::{Node, TravellerSchema};
