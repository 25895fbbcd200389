//! Inbound adapters that translate external requests into directory calls
//! while keeping framework details at the edge.
//!
//! The GraphQL schema lives under [`graphql`]; [`http`] mounts it on Actix
//! together with the GraphiQL page and the health probes.

pub mod graphql;
pub mod http;
