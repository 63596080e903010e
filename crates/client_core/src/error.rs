use shared::error::{ApiException, ErrorCode};
use thiserror::Error;

/// How a failure reached the user: the request never completed or the server
/// errored, the API answered `success: false`, or the input was refused before
/// anything was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Rejected,
    Validation,
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("api error: {0}")]
    Api(#[from] ApiException),
    #[error("{0}")]
    Validation(String),
    #[error("invalid api url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Api(err) if err.code == ErrorCode::Rejected => ErrorKind::Rejected,
            ClientError::Transport(_) | ClientError::Api(_) | ClientError::InvalidUrl(_) => {
                ErrorKind::Transport
            }
            ClientError::Validation(_) => ErrorKind::Validation,
        }
    }

    /// Message meant for the user. Server messages are passed through untouched.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api(err) if err.code == ErrorCode::Rejected => err.message.clone(),
            ClientError::Validation(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

pub type ClientResult<T> = std::result::Result<T, ClientError>;
