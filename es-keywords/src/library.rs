//! Keyword library implementation.
//!
//! Every keyword connects to the target, runs exactly one remote request and
//! translates any failure into the matching [`KeywordError`] kind. Nothing is
//! kept between calls: the handle is dropped when the keyword returns.

use std::future::Future;

use serde_json::Value;
use tracing::{error, info, instrument};

use crate::config::ConnectorConfig;
use crate::errors::{EngineError, KeywordError};
use crate::interfaces::{Connector, EngineHandle};
use crate::opensearch::OpenSearchConnector;
use crate::types::{ConnectionTarget, Payload};

/// The keyword library for querying and managing a search engine.
///
/// # Example
///
/// ```ignore
/// let library = ElasticSearchLibrary::new();
/// library.create_index("localhost", 9200, "t1", None).await?;
/// library
///     .index_document("localhost", 9200, "t1", "doc", "1", &json!({"a": 1}))
///     .await?;
/// assert_eq!(library.count("localhost", 9200, "t1", None).await?, 1);
/// ```
pub struct ElasticSearchLibrary<C = OpenSearchConnector> {
    connector: C,
}

impl ElasticSearchLibrary<OpenSearchConnector> {
    /// Create a library talking to OpenSearch/Elasticsearch with default settings.
    pub fn new() -> Self {
        Self::with_connector(OpenSearchConnector::default())
    }

    /// Create a library talking to OpenSearch/Elasticsearch with custom settings.
    pub fn with_config(config: ConnectorConfig) -> Self {
        Self::with_connector(OpenSearchConnector::new(config))
    }
}

impl Default for ElasticSearchLibrary<OpenSearchConnector> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Connector> ElasticSearchLibrary<C> {
    /// Create a library on top of any connector.
    pub fn with_connector(connector: C) -> Self {
        Self { connector }
    }

    /// Get the connector.
    pub fn connector(&self) -> &C {
        &self.connector
    }

    /// Connect to `host:port`, run `invoke` on the fresh handle and translate
    /// its failure with `fail`.
    async fn call<T, Invoke, Fut, Fail>(
        &self,
        host: &str,
        port: u16,
        invoke: Invoke,
        fail: Fail,
    ) -> Result<T, KeywordError>
    where
        Invoke: FnOnce(C::Handle) -> Fut,
        Fut: Future<Output = Result<T, EngineError>>,
        Fail: FnOnce(EngineError) -> KeywordError,
    {
        let target = ConnectionTarget::new(host, port);

        let handle = self.connector.connect(&target).await.map_err(|e| {
            error!(node = %target, error = %e, "Connection failed");
            KeywordError::connection(host, port, e)
        })?;

        invoke(handle).await.map_err(|e| {
            let err = fail(e);
            error!(node = %target, error = %err, "Keyword failed");
            err
        })
    }

    /// Run a query and return the response as received.
    ///
    /// | `${res}` = | Es Search | localhost | 9200 | myIndex | {"query": {"query_string": {"query": "searched value"}}} |
    pub async fn search(
        &self,
        host: &str,
        port: u16,
        index: &str,
        query: &Value,
    ) -> Result<Value, KeywordError> {
        self.search_payload(host, port, index, Payload::Json(query))
            .await
    }

    #[instrument(skip(self, query))]
    pub(crate) async fn search_payload(
        &self,
        host: &str,
        port: u16,
        index: &str,
        query: Payload<'_>,
    ) -> Result<Value, KeywordError> {
        self.call(
            host,
            port,
            |handle| async move {
                let query = query.resolve("query")?;
                handle.search(index, &query).await
            },
            |e| KeywordError::search(host, port, index, query, e),
        )
        .await
    }

    /// Return the number of documents matching `query`, or all documents of
    /// the index when `query` is `None`.
    ///
    /// The value is read from the `count` field of the response.
    pub async fn count(
        &self,
        host: &str,
        port: u16,
        index: &str,
        query: Option<&Value>,
    ) -> Result<u64, KeywordError> {
        self.count_payload(host, port, index, query.map(Payload::Json))
            .await
    }

    #[instrument(skip(self, query))]
    pub(crate) async fn count_payload(
        &self,
        host: &str,
        port: u16,
        index: &str,
        query: Option<Payload<'_>>,
    ) -> Result<u64, KeywordError> {
        let count = self
            .call(
                host,
                port,
                |handle| async move {
                    let query = query.map(|q| q.resolve("query")).transpose()?;
                    let response = handle.count(index, query.as_deref()).await?;
                    response.get("count").and_then(Value::as_u64).ok_or_else(|| {
                        EngineError::parse(format!(
                            "response has no integer count field: {}",
                            response
                        ))
                    })
                },
                |e| KeywordError::count(host, port, index, query, e),
            )
            .await?;

        info!(count, "Counted documents");
        Ok(count)
    }

    /// Delete an index.
    #[instrument(skip(self))]
    pub async fn delete_index(&self, host: &str, port: u16, index: &str) -> Result<(), KeywordError> {
        self.call(
            host,
            port,
            |handle| async move { handle.delete_index(index).await },
            |e| KeywordError::delete_index(host, port, index, e),
        )
        .await?;

        info!("Deleted index");
        Ok(())
    }

    /// Create an index, with a custom mapping when one is given.
    pub async fn create_index(
        &self,
        host: &str,
        port: u16,
        index: &str,
        mapping: Option<&Value>,
    ) -> Result<(), KeywordError> {
        self.create_index_payload(host, port, index, mapping.map(Payload::Json))
            .await
    }

    #[instrument(skip(self, mapping))]
    pub(crate) async fn create_index_payload(
        &self,
        host: &str,
        port: u16,
        index: &str,
        mapping: Option<Payload<'_>>,
    ) -> Result<(), KeywordError> {
        self.call(
            host,
            port,
            |handle| async move {
                let mapping = mapping.map(|m| m.resolve("mapping")).transpose()?;
                handle.create_index(index, mapping.as_deref()).await
            },
            |e| KeywordError::create_index(host, port, index, e),
        )
        .await?;

        info!("Created index");
        Ok(())
    }

    /// Index a document under a doc type and id.
    ///
    /// The document is sent to `/{index}/{doc_type}/{doc_id}`. Servers without
    /// mapping types (OpenSearch 2.x, Elasticsearch 8) only accept `_doc` as
    /// the doc type and reject any other label with an `IndexDocumentError`.
    ///
    /// | Es Index | localhost | 9200 | myIndex | theDocType | id_457891 | {"address": {"street": "myAddress", "city": "Wow city"}} |
    pub async fn index_document(
        &self,
        host: &str,
        port: u16,
        index: &str,
        doc_type: &str,
        doc_id: &str,
        document: &Value,
    ) -> Result<(), KeywordError> {
        self.index_document_payload(host, port, index, doc_type, doc_id, Payload::Json(document))
            .await
    }

    #[instrument(skip(self, document))]
    pub(crate) async fn index_document_payload(
        &self,
        host: &str,
        port: u16,
        index: &str,
        doc_type: &str,
        doc_id: &str,
        document: Payload<'_>,
    ) -> Result<(), KeywordError> {
        self.call(
            host,
            port,
            |handle| async move {
                let document = document.resolve("document")?;
                handle
                    .index_document(index, doc_type, doc_id, &document)
                    .await
            },
            |e| KeywordError::index_document(host, port, index, doc_type, doc_id, document, e),
        )
        .await?;

        info!("Indexed document");
        Ok(())
    }
}
