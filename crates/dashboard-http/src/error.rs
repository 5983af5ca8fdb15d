use thiserror::Error;

use crate::fetcher::Body;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP status {status}")]
    Status { status: u16, body: Body },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Invalid JSON response: {0}")]
    Decode(String),
}

impl FetchError {
    /// HTTP status of a non-200 response.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Body of a non-200 response.
    pub fn body(&self) -> Option<&Body> {
        match self {
            FetchError::Status { body, .. } => Some(body),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else {
            FetchError::Transport(err.to_string())
        }
    }
}
