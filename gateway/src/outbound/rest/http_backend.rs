//! Reqwest-backed REST backend adapter.
//!
//! This adapter owns transport details only: URL construction, JSON bodies,
//! trace header propagation, HTTP error mapping and body decoding.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::{Client, Method, StatusCode, Url};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::domain::ports::{ResourcePath, RestBackend, RestBackendError, RestMethod, RestRequest};
use crate::domain::{TRACE_ID_HEADER, TraceId};

/// Errors raised while constructing [`HttpRestBackend`].
#[derive(Debug, Error)]
pub enum HttpRestBackendBuildError {
    /// The origin cannot carry resource paths (for example `mailto:`).
    #[error("backend url {url} cannot be used as a base for resource paths")]
    UnsupportedBaseUrl {
        /// Offending URL.
        url: String,
    },
    /// The reqwest client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// REST backend adapter issuing HTTP requests against one origin.
///
/// Resource paths are appended to the origin's own path, so an origin of
/// `http://api.internal/v1` serves users from `http://api.internal/v1/users`.
#[derive(Debug, Clone)]
pub struct HttpRestBackend {
    client: Client,
    base_url: Url,
}

impl HttpRestBackend {
    /// Build an adapter without a request timeout.
    ///
    /// # Examples
    /// ```
    /// use gateway::outbound::rest::HttpRestBackend;
    /// use reqwest::Url;
    ///
    /// let origin = Url::parse("http://localhost:3000").expect("valid url");
    /// assert!(HttpRestBackend::new(origin).is_ok());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error when the origin cannot carry paths or the reqwest
    /// client cannot be constructed.
    pub fn new(base_url: Url) -> Result<Self, HttpRestBackendBuildError> {
        Self::with_timeout(base_url, None)
    }

    /// Build an adapter with an optional per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the origin cannot carry paths or the reqwest
    /// client cannot be constructed.
    pub fn with_timeout(
        base_url: Url,
        timeout: Option<Duration>,
    ) -> Result<Self, HttpRestBackendBuildError> {
        if base_url.cannot_be_a_base() {
            return Err(HttpRestBackendBuildError::UnsupportedBaseUrl {
                url: base_url.to_string(),
            });
        }
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url,
        })
    }

    /// Origin every resource path is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn resource_url(&self, path: &ResourcePath) -> Result<Url, RestBackendError> {
        resource_url(&self.base_url, path)
    }
}

#[async_trait]
impl RestBackend for HttpRestBackend {
    async fn send(&self, request: RestRequest) -> Result<Value, RestBackendError> {
        let url = self.resource_url(&request.path)?;
        debug!(method = %request.method, path = %request.path, "forwarding request to backend");

        let mut builder = self
            .client
            .request(http_method(request.method), url)
            .header(ACCEPT, "application/json");
        if let Some(trace_id) = TraceId::current() {
            builder = builder.header(TRACE_ID_HEADER, trace_id.to_string());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        debug!(
            method = %request.method,
            path = %request.path,
            status = status.as_u16(),
            "backend responded"
        );
        if status == StatusCode::NOT_FOUND {
            return Err(RestBackendError::not_found(request.path.to_string()));
        }
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_body(body.as_ref())
    }
}

fn resource_url(base_url: &Url, path: &ResourcePath) -> Result<Url, RestBackendError> {
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|()| {
            RestBackendError::invalid_request(format!("backend url {base_url} cannot carry a path"))
        })?
        .pop_if_empty()
        .extend(path.segments());
    Ok(url)
}

fn http_method(method: RestMethod) -> Method {
    match method {
        RestMethod::Get => Method::GET,
        RestMethod::Post => Method::POST,
        RestMethod::Patch => Method::PATCH,
        RestMethod::Delete => Method::DELETE,
    }
}

fn parse_body(body: &[u8]) -> Result<Value, RestBackendError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body).map_err(|error| {
        RestBackendError::decode(format!("invalid JSON payload: {error}"))
    })
}

fn map_transport_error(error: reqwest::Error) -> RestBackendError {
    if error.is_timeout() {
        RestBackendError::timeout(error.to_string())
    } else {
        RestBackendError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> RestBackendError {
    let body_preview = body_preview(body);
    let message = if body_preview.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("no response body")
            .to_owned()
    } else {
        body_preview
    };

    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            RestBackendError::timeout(format!("status {}: {message}", status.as_u16()))
        }
        _ => RestBackendError::status(status.as_u16(), message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
