//! OpenSearch implementation of the search engine client library.
//!
//! Speaks the Elasticsearch-compatible REST protocol through the `opensearch`
//! crate, so it works against both OpenSearch and Elasticsearch servers.

mod client;
mod connector;

pub use client::OpenSearchHandle;
pub use connector::OpenSearchConnector;
