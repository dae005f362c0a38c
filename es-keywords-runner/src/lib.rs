//! # Es Keywords Runner
//!
//! Runs a single keyword from the command line so that shell-driven test
//! steps can use the keyword library.

pub mod config;

pub use config::{LogFormat, RunnerConfig};

use es_keywords::{run_keyword, ElasticSearchLibrary, Keyword, KeywordError};
use thiserror::Error;

/// Errors that can occur while running a keyword from the command line.
#[derive(Error, Debug)]
pub enum RunnerError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The keyword failed.
    #[error("{0}")]
    KeywordError(#[from] KeywordError),

    /// The keyword output could not be rendered.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl RunnerError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}

/// Run `keyword` with `args` and render its output as pretty JSON.
pub async fn execute(
    config: &RunnerConfig,
    keyword: &str,
    args: &[String],
) -> Result<String, RunnerError> {
    let library = ElasticSearchLibrary::with_config(config.connector_config());
    let output = run_keyword(&library, keyword, args).await?;
    Ok(serde_json::to_string_pretty(&output.to_json())?)
}

/// Describe every keyword, one per line: name, arguments and documentation.
pub fn keyword_listing() -> String {
    Keyword::ALL
        .into_iter()
        .map(|keyword| {
            let arguments = keyword.arguments();
            let required = arguments.len() - keyword.optional_arguments();
            let signature = arguments
                .iter()
                .enumerate()
                .map(|(i, name)| {
                    if i < required {
                        name.to_string()
                    } else {
                        format!("[{}]", name)
                    }
                })
                .collect::<Vec<_>>()
                .join(" ");
            format!("{:<16} {:<48} {}", keyword.name(), signature, keyword.doc())
        })
        .collect::<Vec<_>>()
        .join("\n")
}
