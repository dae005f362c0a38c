//! Call-scoped value types shared by the library and its connectors.

use std::borrow::Cow;
use std::fmt;

use serde_json::Value;
use url::Url;

use crate::errors::{EngineError, KeywordError};

/// Host and port of the search engine targeted by a single keyword call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionTarget {
    /// Server host name or address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl ConnectionTarget {
    /// Create a target from an already typed port.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Create a target from a textual port, as keyword arguments arrive.
    ///
    /// A port that is not an integer in `0..=65535` is a connection error.
    pub fn parse(host: &str, port: &str) -> Result<Self, KeywordError> {
        let port = port
            .trim()
            .parse::<u16>()
            .map_err(|e| KeywordError::connection(host, port, format!("invalid port: {}", e)))?;
        Ok(Self::new(host, port))
    }

    /// Build the node URL for this target.
    pub fn url(&self, scheme: &str) -> Result<Url, EngineError> {
        let host = if self.host.contains(':') && !self.host.starts_with('[') {
            format!("[{}]", self.host)
        } else {
            self.host.clone()
        };

        let url = Url::parse(&format!("{}://{}:{}", scheme, host, self.port))
            .map_err(|e| EngineError::connection(format!("invalid address {}: {}", self, e)))?;

        if url.host_str().map_or(true, str::is_empty) {
            return Err(EngineError::connection(format!("invalid address {}", self)));
        }

        Ok(url)
    }
}

impl fmt::Display for ConnectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// A request body as handed to a keyword: structured, or still raw text.
///
/// Raw text is only parsed once a handle has been obtained, so a malformed
/// body fails the request step and an unreachable host still fails first.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Payload<'a> {
    Json(&'a Value),
    Text(&'a str),
}

impl<'a> Payload<'a> {
    /// Get the body as JSON; `name` labels the argument in the parse error.
    pub(crate) fn resolve(self, name: &str) -> Result<Cow<'a, Value>, EngineError> {
        match self {
            Payload::Json(value) => Ok(Cow::Borrowed(value)),
            Payload::Text(raw) => serde_json::from_str(raw)
                .map(Cow::Owned)
                .map_err(|e| EngineError::parse(format!("{} is not valid JSON: {}", name, e))),
        }
    }
}

impl fmt::Display for Payload<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Payload::Json(value) => write!(f, "{}", value),
            Payload::Text(raw) => f.write_str(raw),
        }
    }
}
