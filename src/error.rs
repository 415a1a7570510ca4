use reqwest::StatusCode;
use thiserror::Error;

pub const EMPTY_LYRICS_MESSAGE: &str = "Please enter some lyrics.";
pub const GENERATION_FALLBACK_MESSAGE: &str = "Generation failed";

/// Every way a submission can end without a song. The `Display` text is what
/// lands in the error slot, so it is kept free of prefixes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmitError {
    #[error("{}", EMPTY_LYRICS_MESSAGE)]
    Validation,

    #[error("{0}")]
    Generation(String),

    #[error("{0}")]
    Transport(String),

    #[error("Could not read voice sample {path}: {reason}")]
    VoiceSample { path: String, reason: String },
}

impl SubmitError {
    /// Server-reported failure; an absent or empty message falls back to the
    /// generic text.
    pub fn generation(message: Option<String>) -> Self {
        match message {
            Some(message) if !message.is_empty() => Self::Generation(message),
            _ => Self::Generation(GENERATION_FALLBACK_MESSAGE.to_string()),
        }
    }
}

impl From<reqwest::Error> for SubmitError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for SubmitError {
    fn from(err: serde_json::Error) -> Self {
        Self::Transport(format!("Invalid response from server: {err}"))
    }
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Server responded with {0}")]
    Status(StatusCode),

    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
