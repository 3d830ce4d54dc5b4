//! Judgment failures. These never leave the scoring components; every
//! variant is converted into a fallback score there.

use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum JudgeError {
    #[error("no text judge is configured")]
    Unavailable,

    #[error("judgment timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("malformed judgment: {0}")]
    Malformed(String),

    #[error("judgment out of range: {0}")]
    OutOfRange(String),
}

impl From<reqwest::Error> for JudgeError {
    fn from(e: reqwest::Error) -> Self {
        JudgeError::Http(e.to_string())
    }
}
