//! Error types for sidechat.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Session request blocked by bot protection")]
    BlockedByProtection,

    #[error("Session response carried no access token")]
    Unauthenticated,

    #[error("Chat endpoint returned no parseable answer")]
    EmptyResponse,

    #[error("Request aborted by caller")]
    Aborted,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
