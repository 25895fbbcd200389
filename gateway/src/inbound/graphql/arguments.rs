//! Argument parsing shared by the root resolvers.

use crate::domain::{Error, ResourceId, UserValidationError};

/// Parse an identifier argument, rejecting blank or padded values.
pub(crate) fn parse_id(raw: String) -> Result<ResourceId, Error> {
    ResourceId::new(raw).map_err(|error| Error::invalid_request(format!("invalid id: {error}")))
}

/// Require an identifier on a nullable argument.
pub(crate) fn require_id(raw: Option<String>) -> Result<ResourceId, Error> {
    raw.map_or_else(|| Err(Error::invalid_request("id is required")), parse_id)
}

pub(crate) fn invalid_user(error: &UserValidationError) -> Error {
    Error::invalid_request(error.to_string())
}
