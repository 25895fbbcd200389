//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **rest**: reqwest-backed client for the REST backend holding users and
//!   companies.
//!
//! Adapters are thin translators between domain requests and HTTP. They
//! contain no business logic.

pub mod rest;
