//! Domain ports defining the edges of the hexagon.
//!
//! The gateway has a single driven port: the REST backend every resolver
//! ultimately talks to. Adapters map their failures into the typed
//! [`RestBackendError`] variants so the directory can classify them.

mod macros;
pub(crate) use macros::define_port_error;

mod rest_backend;

#[cfg(test)]
pub use rest_backend::MockRestBackend;
pub use rest_backend::{ResourcePath, RestBackend, RestBackendError, RestMethod, RestRequest};
