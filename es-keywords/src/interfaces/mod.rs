//! Interface definitions for the search engine client library.
//!
//! The keyword library only depends on these traits, so the OpenSearch
//! implementation can be swapped for a mock in tests.

mod search_engine;

pub use search_engine::{Connector, EngineHandle};
