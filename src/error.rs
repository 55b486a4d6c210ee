use thiserror::Error;

/// Message handed back to callers when a completion request fails.
pub const TRANSLATION_FAILED: &str = "Failed to translate text. The API call returned an error.";

#[derive(Error, Debug)]
pub enum TolkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Translation error: {0}")]
    Translation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Unknown language code: {0}")]
    UnknownLanguage(String),
}

impl TolkError {
    /// The generic failure surfaced for any backend problem.
    pub fn translation_failed() -> Self {
        Self::Translation(TRANSLATION_FAILED.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TolkError>;
