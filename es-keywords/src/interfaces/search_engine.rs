//! Search engine connector and handle traits.

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::EngineError;
use crate::types::ConnectionTarget;

/// Opens handles to a search engine.
///
/// Each keyword call connects once and drops the handle when it returns, so
/// implementations must not rely on handles being reused.
#[async_trait]
pub trait Connector: Send + Sync {
    /// The handle type produced by this connector.
    type Handle: EngineHandle;

    /// Obtain a handle bound to `target`.
    ///
    /// # Returns
    ///
    /// * `Ok(Handle)` - A handle ready to issue requests
    /// * `Err(EngineError)` - If the address is unusable or the server is unreachable
    async fn connect(&self, target: &ConnectionTarget) -> Result<Self::Handle, EngineError>;
}

/// Remote capabilities used by the keywords.
///
/// Request bodies are forwarded as given; implementations never inspect them.
#[async_trait]
pub trait EngineHandle: Send + Sync {
    /// Run `query` against `index` and return the raw response body.
    async fn search(&self, index: &str, query: &Value) -> Result<Value, EngineError>;

    /// Count documents in `index`, restricted by `query` when present.
    ///
    /// Returns the raw response body, which carries the total in its `count` field.
    async fn count(&self, index: &str, query: Option<&Value>) -> Result<Value, EngineError>;

    /// Delete `index`. A missing index is an error.
    async fn delete_index(&self, index: &str) -> Result<(), EngineError>;

    /// Create `index`, with the server's default mapping when `mapping` is `None`.
    async fn create_index(&self, index: &str, mapping: Option<&Value>) -> Result<(), EngineError>;

    /// Create or replace the document `doc_id` of type `doc_type` in `index`.
    async fn index_document(
        &self,
        index: &str,
        doc_type: &str,
        doc_id: &str,
        document: &Value,
    ) -> Result<(), EngineError>;
}
