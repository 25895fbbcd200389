//! REST backend outbound adapter.
//!
//! This module provides the reqwest implementation of the `RestBackend` port.

mod http_backend;

pub use http_backend::{HttpRestBackend, HttpRestBackendBuildError};
