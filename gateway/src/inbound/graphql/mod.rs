//! GraphQL adapter: schema types and root resolvers.
//!
//! Every field that needs data delegates to the [`Directory`] registered as
//! schema data; nothing here talks to the backend directly.

mod arguments;
mod error;
mod mutation;
mod query;
mod types;

use async_graphql::{EmptySubscription, Schema, SchemaBuilder};

use crate::domain::Directory;

pub use error::{
    INTERNAL_ERROR, NOT_FOUND, TRANSPORT_ERROR, VALIDATION_ERROR, extension_code,
};
pub use mutation::MutationRoot;
pub use query::QueryRoot;
pub use types::{CompanyNode, UserNode};

/// Executable gateway schema.
pub type GatewaySchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Unfinished schema builder without schema data.
///
/// Useful for exporting SDL without a backend:
/// ```
/// let sdl = gateway::inbound::graphql::schema_builder().finish().sdl();
/// assert!(sdl.contains("type RootQueryType"));
/// ```
pub fn schema_builder() -> SchemaBuilder<QueryRoot, MutationRoot, EmptySubscription> {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
}

/// Assemble the schema with the directory registered as schema data.
pub fn build_schema(directory: Directory) -> GatewaySchema {
    schema_builder().data(directory).finish()
}
