//! OpenSearch handle implementation.
//!
//! This module provides the concrete implementation of `EngineHandle`
//! using the OpenSearch Rust client.

use async_trait::async_trait;
use opensearch::{
    http::{headers::HeaderMap, request::JsonBody, response::Response, Method},
    indices::{IndicesCreateParts, IndicesDeleteParts},
    CountParts, OpenSearch, SearchParts,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error, instrument};

use crate::errors::EngineError;
use crate::interfaces::EngineHandle;

/// Query string of the document index request.
#[derive(Debug, Serialize)]
struct IndexDocumentParams {
    /// Make the document visible to the next search or count.
    refresh: bool,
}

/// A client bound to a single OpenSearch node.
///
/// Created by [`OpenSearchConnector`](super::OpenSearchConnector); dropping it
/// releases the underlying HTTP client.
pub struct OpenSearchHandle {
    client: OpenSearch,
}

impl OpenSearchHandle {
    pub(crate) fn new(client: OpenSearch) -> Self {
        Self { client }
    }

    /// Build the REST path of a typed document.
    ///
    /// Uses format: `/{index}/{doc_type}/{doc_id}` with each segment percent-encoded.
    fn document_path(index: &str, doc_type: &str, doc_id: &str) -> String {
        format!(
            "/{}/{}/{}",
            urlencoding::encode(index),
            urlencoding::encode(doc_type),
            urlencoding::encode(doc_id)
        )
    }

    /// Turn a non-success response into a `StatusError`.
    async fn check_status(response: Response) -> Result<Response, EngineError> {
        let status = response.status_code();
        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        error!(status = %status, body = %error_body, "Request failed");
        Err(EngineError::status(status.as_u16(), error_body))
    }

    /// Check the status and decode the JSON body.
    async fn read_json(response: Response) -> Result<Value, EngineError> {
        Self::check_status(response)
            .await?
            .json::<Value>()
            .await
            .map_err(|e| EngineError::parse(e.to_string()))
    }
}

#[async_trait]
impl EngineHandle for OpenSearchHandle {
    #[instrument(skip(self, query))]
    async fn search(&self, index: &str, query: &Value) -> Result<Value, EngineError> {
        let indices = [index];
        let response = self
            .client
            .search(SearchParts::Index(&indices))
            .body(query)
            .send()
            .await?;

        let body = Self::read_json(response).await?;
        debug!("Search completed");
        Ok(body)
    }

    #[instrument(skip(self, query))]
    async fn count(&self, index: &str, query: Option<&Value>) -> Result<Value, EngineError> {
        let indices = [index];
        let request = self.client.count(CountParts::Index(&indices));
        let response = match query {
            Some(query) => request.body(query).send().await?,
            None => request.send().await?,
        };

        let body = Self::read_json(response).await?;
        debug!(count = %body["count"], "Count completed");
        Ok(body)
    }

    #[instrument(skip(self))]
    async fn delete_index(&self, index: &str) -> Result<(), EngineError> {
        let indices = [index];
        let response = self
            .client
            .indices()
            .delete(IndicesDeleteParts::Index(&indices))
            .send()
            .await?;

        Self::check_status(response).await?;
        debug!("Index deleted");
        Ok(())
    }

    #[instrument(skip(self, mapping))]
    async fn create_index(&self, index: &str, mapping: Option<&Value>) -> Result<(), EngineError> {
        let indices = self.client.indices();
        let request = indices.create(IndicesCreateParts::Index(index));
        let response = match mapping {
            Some(mapping) => request.body(mapping).send().await?,
            None => request.send().await?,
        };

        Self::check_status(response).await?;
        debug!(custom_mapping = mapping.is_some(), "Index created");
        Ok(())
    }

    #[instrument(skip(self, document))]
    async fn index_document(
        &self,
        index: &str,
        doc_type: &str,
        doc_id: &str,
        document: &Value,
    ) -> Result<(), EngineError> {
        let path = Self::document_path(index, doc_type, doc_id);
        let params = IndexDocumentParams { refresh: true };

        let response = self
            .client
            .send(
                Method::Put,
                &path,
                HeaderMap::new(),
                Some(&params),
                Some(JsonBody::new(document)),
                None,
            )
            .await?;

        Self::check_status(response).await?;
        debug!(path = %path, "Document indexed");
        Ok(())
    }
}
