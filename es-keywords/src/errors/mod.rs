//! Error types for the keyword library.

mod engine_error;
mod keyword_error;

pub use engine_error::EngineError;
pub use keyword_error::KeywordError;
