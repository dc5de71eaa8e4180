use thiserror::Error;

/// Settings file failures
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that reach the caller. Question and answer problems never do;
/// they degrade to a fallback question or an incorrect answer.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("console: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
