//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use gateway::inbound::graphql::GatewaySchema;

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) schema: GatewaySchema,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) graphiql: bool,
}

impl ServerConfig {
    /// Construct a server configuration serving `schema` on `bind_addr`.
    #[must_use]
    pub fn new(schema: GatewaySchema, bind_addr: SocketAddr) -> Self {
        Self {
            schema,
            bind_addr,
            graphiql: true,
        }
    }

    /// Enable or disable the GraphiQL page at `/`.
    #[must_use]
    pub fn with_graphiql(mut self, enabled: bool) -> Self {
        self.graphiql = enabled;
        self
    }
}
