//! Error handling for the collectors

use thiserror::Error;

/// Construction-time misconfiguration. Always fatal.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Config array cannot be empty")]
    Empty,

    #[error("No enabled configurations found for collector type: {0}")]
    NoMatchingConfigs(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to load config file: {0}")]
    Load(String),
}

/// Price-related errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PriceError {
    #[error("Price unavailable for {token}: {reason}")]
    Unavailable { token: String, reason: String },
}

impl PriceError {
    pub fn unavailable(token: impl Into<String>, reason: impl Into<String>) -> Self {
        PriceError::Unavailable {
            token: token.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised while collecting a batch or a single pool.
///
/// `Transport` fails the whole batch; everything else is scoped to one pool.
#[derive(Error, Debug)]
pub enum CollectorError {
    #[error("Data integrity error: {0}")]
    DataIntegrity(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Blockchain error: {0}")]
    Chain(String),

    #[error(transparent)]
    Price(#[from] PriceError),
}

impl From<reqwest::Error> for CollectorError {
    fn from(err: reqwest::Error) -> Self {
        CollectorError::Transport(err.to_string())
    }
}
