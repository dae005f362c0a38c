//! # Es Keywords
//!
//! Test-automation keywords for querying an Elasticsearch/OpenSearch server:
//! run a query, count documents, and manage indices and documents.
//!
//! Every keyword opens its own connection, issues one request and reports
//! failures as a [`KeywordError`] naming the failed step and the target.

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod keywords;
pub mod library;
pub mod opensearch;
pub mod types;

pub use config::ConnectorConfig;
pub use errors::{EngineError, KeywordError};
pub use interfaces::{Connector, EngineHandle};
pub use keywords::{run_keyword, Keyword, KeywordOutput, LIBRARY_VERSION};
pub use library::ElasticSearchLibrary;
pub use crate::opensearch::{OpenSearchConnector, OpenSearchHandle};
pub use types::ConnectionTarget;
