//! Runner configuration.

mod settings;

pub use settings::{LogFormat, RunnerConfig};
