//! Mapping from domain errors onto GraphQL field errors.

use async_graphql::{Context, ErrorExtensions};
use tracing::error;

use crate::domain::{Directory, Error, ErrorCode};

/// Extension code for arguments rejected before any backend call.
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
/// Extension code for a backend 404.
pub const NOT_FOUND: &str = "NOT_FOUND";
/// Extension code for any other backend failure.
pub const TRANSPORT_ERROR: &str = "TRANSPORT_ERROR";
/// Extension code for gateway faults. The message is redacted.
pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";

const REDACTED_MESSAGE: &str = "Internal server error";

/// GraphQL extension code for a domain error code.
pub fn extension_code(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::InvalidRequest => VALIDATION_ERROR,
        ErrorCode::NotFound => NOT_FOUND,
        ErrorCode::Upstream => TRANSPORT_ERROR,
        ErrorCode::InternalError => INTERNAL_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> String {
    if error.code() == ErrorCode::InternalError {
        error!(message = %error.message(), trace_id = ?error.trace_id(), "internal error");
        REDACTED_MESSAGE.to_owned()
    } else {
        error.message().to_owned()
    }
}

impl ErrorExtensions for Error {
    fn extend(&self) -> async_graphql::Error {
        let code = extension_code(self.code());
        let trace_id = self.trace_id().map(str::to_owned);
        async_graphql::Error::new(redact_if_internal(self)).extend_with(|_, extensions| {
            extensions.set("code", code);
            if let Some(trace_id) = trace_id {
                extensions.set("traceId", trace_id);
            }
        })
    }
}

/// Convert a domain error into a GraphQL field error with extensions.
///
/// Domain errors also satisfy async-graphql's blanket `From<Display>`, which
/// drops the extensions, so conversion always goes through here.
pub(crate) fn field_error(error: Error) -> async_graphql::Error {
    error.extend()
}

/// Directory registered on the schema.
pub(crate) fn directory<'ctx>(ctx: &Context<'ctx>) -> Result<&'ctx Directory, Error> {
    ctx.data::<Directory>()
        .map_err(|_| Error::internal("directory is not registered on the schema"))
}

/// Resolve a nullable field from a fallible outcome.
///
/// A failure is recorded against the field's path and the field itself
/// resolves to an explicit null. Propagating the error instead would make the
/// engine drop the key from `data` altogether.
pub(crate) fn null_on_error<T>(ctx: &Context<'_>, outcome: Result<Option<T>, Error>) -> Option<T> {
    outcome.unwrap_or_else(|error| {
        let server_error = field_error(error).into_server_error(ctx.item.pos);
        ctx.add_error(ctx.set_error_path(server_error));
        None
    })
}
