//! Domain primitives, use-cases and ports.
//!
//! Purpose: define the records the gateway exposes (users and companies), the
//! directory use-case that maps each operation onto a REST call, and the port
//! through which that call leaves the hexagon. Nothing here knows about
//! GraphQL, Actix or reqwest.
//!
//! Public surface:
//! - Directory: use-case service backing every resolver.
//! - Error / ErrorCode: transport agnostic failure payload.
//! - User / NewUser / UserPatch: user records and write models.
//! - Company: read-only company record.
//! - ResourceId: identifier shared by all backend records.
//! - TraceId: request-scoped correlation identifier.

pub mod company;
pub mod directory;
pub mod error;
pub mod ports;
pub mod resource_id;
pub mod trace_id;
pub mod user;

pub use self::company::Company;
pub use self::directory::Directory;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::resource_id::{ResourceId, ResourceIdValidationError};
pub use self::trace_id::TraceId;
pub use self::user::{CompanyLink, NewUser, User, UserPatch, UserValidationError};

/// HTTP header carrying the request trace identifier, both on gateway
/// responses and on calls forwarded to the REST backend.
pub const TRACE_ID_HEADER: &str = "trace-id";
