//! Runner settings loaded from the environment.

use std::env;
use std::str::FromStr;

use es_keywords::config::{ConnectorConfig, DEFAULT_SCHEME};

use crate::RunnerError;

/// Environment variable selecting the log format.
const LOG_FORMAT_VAR: &str = "ES_KEYWORDS_LOG_FORMAT";

/// Environment variable selecting the URL scheme of the search engine.
const SCHEME_VAR: &str = "ES_KEYWORDS_SCHEME";

/// Format of the log lines written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

impl FromStr for LogFormat {
    type Err = RunnerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" | "" => Ok(LogFormat::Plain),
            "json" => Ok(LogFormat::Json),
            other => Err(RunnerError::config(format!(
                "{} must be 'plain' or 'json', got '{}'",
                LOG_FORMAT_VAR, other
            ))),
        }
    }
}

/// Settings of the runner binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunnerConfig {
    pub log_format: LogFormat,
    pub scheme: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            log_format: LogFormat::Plain,
            scheme: DEFAULT_SCHEME.to_string(),
        }
    }
}

impl RunnerConfig {
    /// Load settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `ES_KEYWORDS_LOG_FORMAT`: `plain` or `json` (default: plain)
    /// - `ES_KEYWORDS_SCHEME`: URL scheme of the server (default: http)
    pub fn from_env() -> Result<Self, RunnerError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load settings through `lookup`, which returns the value of a variable if set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, RunnerError> {
        let log_format = match lookup(LOG_FORMAT_VAR) {
            Some(value) => value.parse()?,
            None => LogFormat::default(),
        };

        let scheme = lookup(SCHEME_VAR).unwrap_or_else(|| DEFAULT_SCHEME.to_string());
        if scheme != "http" && scheme != "https" {
            return Err(RunnerError::config(format!(
                "{} must be 'http' or 'https', got '{}'",
                SCHEME_VAR, scheme
            )));
        }

        Ok(Self { log_format, scheme })
    }

    /// Connector settings for the keyword library.
    pub fn connector_config(&self) -> ConnectorConfig {
        ConnectorConfig::default().with_scheme(self.scheme.clone())
    }
}
