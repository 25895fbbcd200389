//! Gateway configuration loaded via OrthoConfig.
//!
//! Values come from CLI flags, `GATEWAY_*` environment variables and config
//! files. Accessors apply defaults and validate the raw strings.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

const DEFAULT_BACKEND_URL: &str = "http://localhost:3000";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:4000";

/// Errors raised while interpreting configured values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `backend_url` is not an absolute http(s) URL.
    #[error("invalid backend url {value:?}: {reason}")]
    InvalidBackendUrl { value: String, reason: String },
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address {value:?}: {reason}")]
    InvalidBindAddr { value: String, reason: String },
    /// `request_timeout_secs` is zero.
    #[error("request timeout must be at least one second")]
    ZeroTimeout,
}

/// Configuration values for the GraphQL gateway.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GATEWAY")]
pub struct GatewaySettings {
    /// Origin of the REST backend.
    pub backend_url: Option<String>,
    /// Socket address the HTTP server listens on.
    pub bind_addr: Option<String>,
    /// Per-request timeout for backend calls, in seconds. Unset means none.
    pub request_timeout_secs: Option<u64>,
    /// Stop serving the GraphiQL page at `/`.
    #[ortho_config(default = false)]
    pub disable_graphiql: bool,
}

impl GatewaySettings {
    /// Backend origin, falling back to `http://localhost:3000`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBackendUrl`] when the value does not
    /// parse or does not use the http(s) scheme.
    pub fn backend_url(&self) -> Result<Url, ConfigError> {
        let raw = self.backend_url.as_deref().unwrap_or(DEFAULT_BACKEND_URL);
        let invalid = |reason: String| ConfigError::InvalidBackendUrl {
            value: raw.to_owned(),
            reason,
        };
        let url = Url::parse(raw).map_err(|error| invalid(error.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(invalid(format!("unsupported scheme {other}"))),
        }
    }

    /// Listen address, falling back to `0.0.0.0:4000`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBindAddr`] when the value is not a
    /// socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|error: std::net::AddrParseError| {
            ConfigError::InvalidBindAddr {
                value: raw.to_owned(),
                reason: error.to_string(),
            }
        })
    }

    /// Backend request timeout, if configured.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroTimeout`] for a zero-second timeout.
    pub fn request_timeout(&self) -> Result<Option<Duration>, ConfigError> {
        match self.request_timeout_secs {
            Some(0) => Err(ConfigError::ZeroTimeout),
            Some(secs) => Ok(Some(Duration::from_secs(secs))),
            None => Ok(None),
        }
    }

    /// Whether `/` serves GraphiQL. Enabled unless turned off.
    pub fn graphiql_enabled(&self) -> bool {
        !self.disable_graphiql
    }
}
