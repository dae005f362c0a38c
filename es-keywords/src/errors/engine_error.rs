//! Engine error types.
//!
//! This module defines the errors reported by a search engine handle. They
//! never reach keyword callers directly; the library folds them into a
//! [`KeywordError`](super::KeywordError) message.

use thiserror::Error;

/// Errors that can occur while talking to the search engine.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The server could not be reached or the address is unusable.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The request could not be sent or its response could not be read.
    #[error("Transport error: {0}")]
    TransportError(String),

    /// The server answered with a non-success status code.
    #[error("Request failed with status {status}: {body}")]
    StatusError { status: u16, body: String },

    /// The response body was not what the caller expected.
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl EngineError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::TransportError(msg.into())
    }

    /// Create a status error.
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self::StatusError {
            status,
            body: body.into(),
        }
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }
}

impl From<opensearch::Error> for EngineError {
    fn from(err: opensearch::Error) -> Self {
        Self::TransportError(err.to_string())
    }
}
