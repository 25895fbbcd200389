//! Driven port for the REST backend holding users and companies.
//!
//! The domain owns the request shape (method, resource path, optional JSON
//! body) so use-cases select method and path per operation while adapters
//! own transport details only.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use super::define_port_error;

/// HTTP method used for a backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RestMethod {
    /// Read a resource or collection.
    Get,
    /// Create a resource.
    Post,
    /// Partially update a resource.
    Patch,
    /// Remove a resource.
    Delete,
}

impl RestMethod {
    /// Upper-case method name as sent on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for RestMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resource path relative to the backend origin, kept as raw segments.
///
/// Segments are encoded by the adapter, so an identifier such as `a/b` stays
/// one segment instead of addressing a nested resource.
///
/// # Examples
/// ```
/// use gateway::domain::ports::ResourcePath;
///
/// let path = ResourcePath::collection("companies").child("1").child("users");
/// assert_eq!(path.to_string(), "/companies/1/users");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourcePath(Vec<String>);

impl ResourcePath {
    /// Path addressing a top-level collection such as `users`.
    pub fn collection(name: impl Into<String>) -> Self {
        Self(vec![name.into()])
    }

    /// Append one segment.
    #[must_use]
    pub fn child(mut self, segment: impl Into<String>) -> Self {
        self.0.push(segment.into());
        self
    }

    /// Raw, unencoded segments in order.
    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for ResourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.0 {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

/// One call to the REST backend.
#[derive(Debug, Clone, PartialEq)]
pub struct RestRequest {
    /// HTTP method.
    pub method: RestMethod,
    /// Resource path.
    pub path: ResourcePath,
    /// JSON body for `POST` and `PATCH`.
    pub body: Option<Value>,
}

impl RestRequest {
    /// `GET` request without a body.
    pub fn get(path: ResourcePath) -> Self {
        Self {
            method: RestMethod::Get,
            path,
            body: None,
        }
    }

    /// `POST` request carrying a JSON body.
    pub fn post(path: ResourcePath, body: Value) -> Self {
        Self {
            method: RestMethod::Post,
            path,
            body: Some(body),
        }
    }

    /// `PATCH` request carrying a JSON body.
    pub fn patch(path: ResourcePath, body: Value) -> Self {
        Self {
            method: RestMethod::Patch,
            path,
            body: Some(body),
        }
    }

    /// `DELETE` request without a body.
    pub fn delete(path: ResourcePath) -> Self {
        Self {
            method: RestMethod::Delete,
            path,
            body: None,
        }
    }
}

define_port_error! {
    /// Errors surfaced while calling the REST backend.
    pub enum RestBackendError {
        /// The backend answered 404 for the path.
        NotFound { path: String } =>
            "backend has no resource at {path}",
        /// The backend answered with another non-success status.
        Status { status: u16, message: String } =>
            "backend responded with status {status}: {message}",
        /// Network transport failed before a response was received.
        Transport { message: String } =>
            "backend transport failed: {message}",
        /// The call exceeded the configured timeout.
        Timeout { message: String } =>
            "backend request timed out: {message}",
        /// The response body is not valid JSON.
        Decode { message: String } =>
            "backend response decode failed: {message}",
        /// The adapter could not build the request.
        InvalidRequest { message: String } =>
            "backend request invalid: {message}",
    }
}

/// Port for issuing resource-oriented calls against the REST backend.
///
/// Implementations return the parsed JSON body of a successful response, or
/// `Value::Null` when a successful response carries no body. There are no
/// retries: a failure surfaces immediately.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RestBackend: Send + Sync {
    /// Send one request and return the decoded body.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use gateway::domain::ports::{ResourcePath, RestBackend, RestRequest};
    ///
    /// let body = backend
    ///     .send(RestRequest::get(ResourcePath::collection("users").child("23")))
    ///     .await?;
    /// assert_eq!(body["id"], "23");
    /// # Ok::<(), gateway::domain::ports::RestBackendError>(())
    /// ```
    async fn send(&self, request: RestRequest) -> Result<Value, RestBackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case::collection(ResourcePath::collection("users"), "/users")]
    #[case::member(ResourcePath::collection("users").child("23"), "/users/23")]
    #[case::nested(
        ResourcePath::collection("companies").child("1").child("users"),
        "/companies/1/users"
    )]
    fn paths_display_with_leading_slash(#[case] path: ResourcePath, #[case] expected: &str) {
        assert_eq!(path.to_string(), expected);
    }

    #[rstest]
    fn constructors_select_method_and_body() {
        let path = ResourcePath::collection("users");
        assert_eq!(RestRequest::get(path.clone()).method, RestMethod::Get);
        assert!(RestRequest::delete(path.clone()).body.is_none());

        let patch = RestRequest::patch(path, json!({ "age": 31 }));
        assert_eq!(patch.method, RestMethod::Patch);
        assert_eq!(patch.body, Some(json!({ "age": 31 })));
    }

    #[rstest]
    fn status_errors_render_code_and_message() {
        let error = RestBackendError::status(502_u16, "bad gateway");
        assert_eq!(
            error.to_string(),
            "backend responded with status 502: bad gateway"
        );
    }
}
