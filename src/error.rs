// Error taxonomy for the moderation adapters.
//
// Three kinds of failure: bad configuration (fatal at construction), bad
// input (rejected before any request goes out), and anything the remote call
// returns. Nothing here is retried or swallowed.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModerationError {
    /// Credential missing, unreadable or malformed, or an invalid setting.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Empty batch or empty text.
    #[error("invalid moderation input: {0}")]
    Validation(String),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Failures coming back from the remote classification call.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{provider} api error ({status}): {body}")]
    Api {
        provider: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("malformed {provider} response: {message}")]
    MalformedResponse {
        provider: &'static str,
        message: String,
    },
}

impl From<reqwest::Error> for ModerationError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(TransportError::Http(err))
    }
}

impl ModerationError {
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

pub type Result<T> = std::result::Result<T, ModerationError>;
