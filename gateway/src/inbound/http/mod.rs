//! HTTP inbound adapter mounting the GraphQL schema on Actix.
//!
//! ```text
//! GET|POST /graphql       Execute GraphQL documents
//! GET      /              GraphiQL page (optional)
//! GET      /health/ready  Readiness probe
//! GET      /health/live   Liveness probe
//! ```

pub mod graphql;
pub mod health;
pub mod playground;

/// Path serving GraphQL-over-HTTP.
pub const GRAPHQL_PATH: &str = "/graphql";
