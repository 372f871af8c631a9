use smol_load_core::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid target URL: {0}")]
    InvalidTarget(#[from] url::ParseError),
}

/// Failure of a single iteration. Returned to the engine, which records it as a failed
/// iteration; never retried here.
#[derive(Debug, Error)]
pub enum IterationError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Iteration failed: {0}")]
    Failed(String),
}
