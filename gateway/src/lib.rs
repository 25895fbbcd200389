//! GraphQL gateway library modules.
//!
//! The gateway exposes a GraphQL schema whose resolvers forward every field to
//! a conventional REST backend. Modules follow the hexagonal split: `domain`
//! owns records, use-cases and ports; `inbound` hosts the GraphQL and HTTP
//! adapters; `outbound` hosts the reqwest-backed REST client.

pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use domain::TraceId;
pub use middleware::Trace;
