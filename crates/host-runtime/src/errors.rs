//! Startup errors

use host_config::ConfigError;
use service_graph::GraphError;
use thiserror::Error;

/// Every startup failure is fatal; the host never serves with a partial
/// registry.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("composition error: {0}")]
    Composition(#[from] GraphError),

    /// Composition already ran in this process
    #[error("startup has already run in this process")]
    AlreadyStarted,
}

/// Text encoding failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    #[error("encoding not available: {label}")]
    Unsupported { label: String },

    #[error("input is not valid {encoding}")]
    Malformed { encoding: &'static str },

    #[error("text cannot be represented in {encoding}")]
    Unmappable { encoding: &'static str },

    /// UTF-16 variants decode only
    #[error("{encoding} cannot be used for output")]
    DecodeOnly { encoding: &'static str },
}
