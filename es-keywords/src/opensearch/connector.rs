//! OpenSearch connector.

use async_trait::async_trait;
use opensearch::{
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    OpenSearch,
};
use tracing::{debug, info, instrument};

use crate::config::ConnectorConfig;
use crate::errors::EngineError;
use crate::interfaces::Connector;
use crate::opensearch::client::OpenSearchHandle;
use crate::types::ConnectionTarget;

/// Builds one single-node OpenSearch client per connection.
///
/// # Example
///
/// ```ignore
/// let connector = OpenSearchConnector::default();
/// let handle = connector.connect(&ConnectionTarget::new("localhost", 9200)).await?;
/// let response = handle.search("books", &json!({"query": {"match_all": {}}})).await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct OpenSearchConnector {
    config: ConnectorConfig,
}

impl OpenSearchConnector {
    /// Create a connector with the given configuration.
    pub fn new(config: ConnectorConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &ConnectorConfig {
        &self.config
    }
}

#[async_trait]
impl Connector for OpenSearchConnector {
    type Handle = OpenSearchHandle;

    #[instrument(skip(self, target), fields(node = %target))]
    async fn connect(&self, target: &ConnectionTarget) -> Result<OpenSearchHandle, EngineError> {
        let url = target.url(&self.config.scheme)?;

        let conn_pool = SingleNodeConnectionPool::new(url);
        let mut builder = TransportBuilder::new(conn_pool);
        if self.config.disable_proxy {
            builder = builder.disable_proxy();
        }
        let transport = builder
            .build()
            .map_err(|e| EngineError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        // Any HTTP answer proves the node is reachable; auth or status
        // problems surface on the actual request.
        if self.config.verify_connection {
            let response = client
                .ping()
                .send()
                .await
                .map_err(|e| EngineError::connection(e.to_string()))?;
            debug!(status = %response.status_code(), "Ping answered");
        }

        info!(scheme = %self.config.scheme, "Created OpenSearch client");

        Ok(OpenSearchHandle::new(client))
    }
}
