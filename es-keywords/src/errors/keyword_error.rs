//! Keyword error types.
//!
//! Every keyword failure ends up as one of these kinds. The payload is the
//! complete human-readable message: the failed step, the target `host:port`,
//! the index and the offending payload, followed by the underlying cause.

use std::fmt::Display;

use thiserror::Error;

/// Errors raised by the keywords.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeywordError {
    /// No client handle could be obtained for the target.
    #[error("{0}")]
    ConnectionError(String),

    /// The search request failed after connecting.
    #[error("{0}")]
    SearchError(String),

    /// The count request failed after connecting.
    #[error("{0}")]
    CountError(String),

    /// The index could not be deleted.
    #[error("{0}")]
    DeleteIndexError(String),

    /// The index could not be created.
    #[error("{0}")]
    CreateIndexError(String),

    /// The document could not be indexed.
    #[error("{0}")]
    IndexDocumentError(String),

    /// The keyword was unknown or called with unusable arguments.
    #[error("Argument error: {0}")]
    ArgumentError(String),
}

impl KeywordError {
    /// Create a connection error.
    pub fn connection(host: &str, port: impl Display, cause: impl Display) -> Self {
        Self::ConnectionError(format!("Connection error on {}:{}: {}", host, port, cause))
    }

    /// Create a search error.
    pub fn search(
        host: &str,
        port: u16,
        index: &str,
        query: impl Display,
        cause: impl Display,
    ) -> Self {
        Self::SearchError(format!(
            "Search error on {}:{}/{} for query : {}: {}",
            host, port, index, query, cause
        ))
    }

    /// Create a count error. An absent query is reported as `none`.
    pub fn count(
        host: &str,
        port: u16,
        index: &str,
        query: Option<impl Display>,
        cause: impl Display,
    ) -> Self {
        let query = query.map_or_else(|| "none".to_string(), |q| q.to_string());
        Self::CountError(format!(
            "Count error on {}:{}/{} for query : {}: {}",
            host, port, index, query, cause
        ))
    }

    /// Create a delete index error.
    pub fn delete_index(host: &str, port: u16, index: &str, cause: impl Display) -> Self {
        Self::DeleteIndexError(format!(
            "Can't delete the index {} on {}:{}: {}",
            index, host, port, cause
        ))
    }

    /// Create a create index error.
    pub fn create_index(host: &str, port: u16, index: &str, cause: impl Display) -> Self {
        Self::CreateIndexError(format!(
            "Can't create the index {} on {}:{}: {}",
            index, host, port, cause
        ))
    }

    /// Create an index document error.
    pub fn index_document(
        host: &str,
        port: u16,
        index: &str,
        doc_type: &str,
        doc_id: &str,
        document: impl Display,
        cause: impl Display,
    ) -> Self {
        Self::IndexDocumentError(format!(
            "Index error on {}:{}/{}/{}/{} for document : {}: {}",
            host, port, index, doc_type, doc_id, document, cause
        ))
    }

    /// Create an argument error.
    pub fn argument(msg: impl Into<String>) -> Self {
        Self::ArgumentError(msg.into())
    }

    /// Check whether this error came from the connect step.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::ConnectionError(_))
    }
}
