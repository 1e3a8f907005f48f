use thiserror::Error;

/// Errors raised by the greeting engine and its I/O edges.
#[derive(Debug, Error)]
pub enum GreetingError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// A dictionary could not be fetched or was not a JSON object.
    #[error("dictionary error for '{lang}': {reason}")]
    Dictionary { lang: String, reason: String },

    #[error("clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("share failed: {0}")]
    Share(String),

    #[error("unknown recipient: {0}")]
    UnknownRecipient(String),

    #[error("unknown tone: {0}")]
    UnknownTone(String),

    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
}

pub type Result<T> = std::result::Result<T, GreetingError>;
