use crate::client::ClientError;
use crate::constants::{INVALID_QUERY_MESSAGE, SERVICE_FAILURE_MESSAGE};

#[derive(Debug, thiserror::Error)]
pub enum FinderError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid medicine name: {0}")]
    InvalidQuery(#[from] medfind_types::TextError),
    #[error("alternatives service call failed: {0}")]
    Service(#[from] ClientError),
    #[error("failed to parse alternatives response: {0}")]
    MalformedResponse(#[source] serde_json::Error),
}

impl FinderError {
    /// Message that is safe to show to an end user.
    ///
    /// Never includes the diagnostic detail carried by the error itself.
    pub fn user_message(&self) -> &'static str {
        match self {
            FinderError::InvalidQuery(_) => INVALID_QUERY_MESSAGE,
            FinderError::InvalidInput(_)
            | FinderError::Service(_)
            | FinderError::MalformedResponse(_) => SERVICE_FAILURE_MESSAGE,
        }
    }
}

pub type FinderResult<T> = std::result::Result<T, FinderError>;
