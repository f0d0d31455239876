//! Error taxonomy for the songs API.
//!
//! Every variant carries the human-readable message that ends up in the
//! store and in notifications, so `Display` is the bare message.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Transport failure or a non-success HTTP status.
    #[error("{0}")]
    Network(String),

    /// The server rejected the submitted fields.
    #[error("{0}")]
    Validation(String),

    /// The song addressed by an update or delete does not exist.
    #[error("{0}")]
    NotFound(String),
}

impl ApiError {
    pub fn message(&self) -> &str {
        match self {
            ApiError::Network(msg) | ApiError::Validation(msg) | ApiError::NotFound(msg) => msg,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Network(_) => "network",
            ApiError::Validation(_) => "validation",
            ApiError::NotFound(_) => "not_found",
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Network(err.to_string())
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_bare_message() {
        let err = ApiError::NotFound("Song not found".to_string());
        assert_eq!(err.to_string(), "Song not found");
        assert_eq!(err.message(), "Song not found");
        assert_eq!(err.kind(), "not_found");
    }
}
