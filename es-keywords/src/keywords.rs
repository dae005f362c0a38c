//! Keyword dispatch.
//!
//! Keyword-driven runners pass every argument as text. This module resolves a
//! keyword by name, checks its arguments, coerces the port and calls the
//! matching [`ElasticSearchLibrary`] operation. JSON payloads travel as text
//! and are parsed once the connection is up, so a malformed payload fails with
//! the keyword's own error kind.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;
use tracing::debug;

use crate::errors::KeywordError;
use crate::interfaces::Connector;
use crate::library::ElasticSearchLibrary;
use crate::types::{ConnectionTarget, Payload};

/// Version of the keyword library.
pub const LIBRARY_VERSION: &str = "1.1";

/// The keywords exposed by the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Search,
    Count,
    DeleteIndex,
    CreateIndex,
    Index,
}

impl Keyword {
    /// All keywords, in documentation order.
    pub const ALL: [Keyword; 5] = [
        Keyword::Search,
        Keyword::Count,
        Keyword::DeleteIndex,
        Keyword::CreateIndex,
        Keyword::Index,
    ];

    /// Display name of the keyword.
    pub fn name(self) -> &'static str {
        match self {
            Keyword::Search => "Es Search",
            Keyword::Count => "Es Count",
            Keyword::DeleteIndex => "Es Delete Index",
            Keyword::CreateIndex => "Es Create Index",
            Keyword::Index => "Es Index",
        }
    }

    /// Argument names, in call order.
    pub fn arguments(self) -> &'static [&'static str] {
        match self {
            Keyword::Search => &["host", "port", "index", "query"],
            Keyword::Count => &["host", "port", "index", "query"],
            Keyword::DeleteIndex => &["host", "port", "index"],
            Keyword::CreateIndex => &["host", "port", "index", "mapping"],
            Keyword::Index => &["host", "port", "index", "doctype", "docid", "document"],
        }
    }

    /// Number of trailing arguments that may be omitted.
    pub fn optional_arguments(self) -> usize {
        match self {
            Keyword::Count | Keyword::CreateIndex => 1,
            _ => 0,
        }
    }

    /// One-line documentation.
    pub fn doc(self) -> &'static str {
        match self {
            Keyword::Search => "Returns the response of a query as a dictionary",
            Keyword::Count => {
                "Returns the number of documents matching a query, or of the whole index without one"
            }
            Keyword::DeleteIndex => "Deletes an index",
            Keyword::CreateIndex => "Creates an index, with an optional custom mapping",
            Keyword::Index => "Indexes a document by doctype and docid",
        }
    }

    /// Look a keyword up by name, ignoring case, spaces and underscores.
    pub fn from_name(name: &str) -> Option<Keyword> {
        let wanted = normalize(name);
        Self::ALL
            .into_iter()
            .find(|keyword| normalize(keyword.name()) == wanted)
    }

    fn check_arity(self, provided: usize) -> Result<(), KeywordError> {
        let max = self.arguments().len();
        let min = max - self.optional_arguments();
        if (min..=max).contains(&provided) {
            return Ok(());
        }

        let expected = if min == max {
            min.to_string()
        } else {
            format!("{} to {}", min, max)
        };
        Err(KeywordError::argument(format!(
            "Keyword '{}' expected {} arguments, got {}",
            self.name(),
            expected,
            provided
        )))
    }

    /// Run the keyword with textual arguments.
    pub async fn run<C: Connector>(
        self,
        library: &ElasticSearchLibrary<C>,
        args: &[String],
    ) -> Result<KeywordOutput, KeywordError> {
        self.check_arity(args.len())?;
        debug!(keyword = self.name(), "Running keyword");

        let target = ConnectionTarget::parse(&args[0], &args[1])?;
        let (host, port, index) = (target.host.as_str(), target.port, args[2].as_str());

        match self {
            Keyword::Search => library
                .search_payload(host, port, index, Payload::Text(&args[3]))
                .await
                .map(KeywordOutput::Response),
            Keyword::Count => library
                .count_payload(host, port, index, optional_payload(args.get(3)))
                .await
                .map(KeywordOutput::Count),
            Keyword::DeleteIndex => library
                .delete_index(host, port, index)
                .await
                .map(|()| KeywordOutput::None),
            Keyword::CreateIndex => library
                .create_index_payload(host, port, index, optional_payload(args.get(3)))
                .await
                .map(|()| KeywordOutput::None),
            Keyword::Index => library
                .index_document_payload(
                    host,
                    port,
                    index,
                    &args[3],
                    &args[4],
                    Payload::Text(&args[5]),
                )
                .await
                .map(|()| KeywordOutput::None),
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Keyword {
    type Err = KeywordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| KeywordError::argument(format!("No keyword named '{}'", s)))
    }
}

/// Value returned by a keyword.
#[derive(Debug, Clone, PartialEq)]
pub enum KeywordOutput {
    /// Raw response of the server.
    Response(Value),
    /// Number of documents.
    Count(u64),
    /// The keyword returns nothing.
    None,
}

impl KeywordOutput {
    /// Render the output as JSON; `None` becomes `null`.
    pub fn to_json(&self) -> Value {
        match self {
            KeywordOutput::Response(value) => value.clone(),
            KeywordOutput::Count(count) => Value::from(*count),
            KeywordOutput::None => Value::Null,
        }
    }
}

/// Resolve `name` and run it with textual arguments.
pub async fn run_keyword<C: Connector>(
    library: &ElasticSearchLibrary<C>,
    name: &str,
    args: &[String],
) -> Result<KeywordOutput, KeywordError> {
    name.parse::<Keyword>()?.run(library, args).await
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != ' ' && *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

/// An omitted argument, an empty one or `None` all mean "absent".
fn optional_payload(raw: Option<&String>) -> Option<Payload<'_>> {
    match raw.map(|s| s.trim()) {
        None | Some("") | Some("None") => None,
        Some(raw) => Some(Payload::Text(raw)),
    }
}
