//! Configuration types for the connector.

/// Default URL scheme used to reach the search engine.
pub const DEFAULT_SCHEME: &str = "http";

/// Configuration for [`OpenSearchConnector`](crate::opensearch::OpenSearchConnector).
#[derive(Debug, Clone)]
pub struct ConnectorConfig {
    /// URL scheme used to build the node address (`http` or `https`).
    pub scheme: String,
    /// Ignore any proxy configured in the environment.
    pub disable_proxy: bool,
    /// Ping the server while connecting so an unreachable host fails the
    /// connect step instead of the first request.
    pub verify_connection: bool,
}

impl Default for ConnectorConfig {
    fn default() -> Self {
        Self {
            scheme: DEFAULT_SCHEME.to_string(),
            disable_proxy: true,
            verify_connection: true,
        }
    }
}

impl ConnectorConfig {
    /// Create a config using the given URL scheme.
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    /// Set whether proxies from the environment are ignored.
    pub fn with_disable_proxy(mut self, disable_proxy: bool) -> Self {
        self.disable_proxy = disable_proxy;
        self
    }

    /// Set whether connecting pings the server.
    pub fn with_verify_connection(mut self, verify_connection: bool) -> Self {
        self.verify_connection = verify_connection;
        self
    }
}
