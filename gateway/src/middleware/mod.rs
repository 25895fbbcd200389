//! Request middleware.
//!
//! Purpose: attach request lifecycle concerns, currently trace correlation,
//! around every route the gateway serves.

pub mod trace;

pub use trace::Trace;
