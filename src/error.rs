use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Fetch error: {0}")]
    FetchError(#[from] FetchError),

    #[error("Decode error: {0}")]
    DecodeError(#[from] DecodeError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP status {0}")]
    HttpStatus(u16),

    #[error("I/O failure: {0}")]
    IoFailure(String),
}

impl FetchError {
    pub fn invalid_url(reason: impl Into<String>) -> Self {
        Self::InvalidUrl(reason.into())
    }

    pub fn io(reason: impl Into<String>) -> Self {
        Self::IoFailure(reason.into())
    }

    /// Status code carried by an [`FetchError::HttpStatus`], if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus(code) => Some(*code),
            _ => None,
        }
    }
}

/// Request URLs carry the API key in their query, so they never reach the message.
impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        let err = err.without_url();
        let mut details = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            details.push_str(&format!(": {cause}"));
            source = cause.source();
        }

        if err.is_timeout() {
            Self::IoFailure(format!("timed out: {details}"))
        } else if err.is_connect() {
            Self::IoFailure(format!("connection failed: {details}"))
        } else {
            Self::IoFailure(details)
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Empty response when data was expected")]
    Empty,

    #[error("Malformed response: {reason}")]
    Malformed { reason: String },
}

impl DecodeError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::Malformed {
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        Self::malformed(err.to_string())
    }
}
