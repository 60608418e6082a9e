use thiserror::Error;
use uspy_client::ClientError;

/// Why the subject record could not be displayed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubjectLoadError {
    #[error("subject not found")]
    NotFound,
    #[error("request failed with status {0}")]
    Status(u16),
    #[error("request failed: {0}")]
    Transport(String),
}

impl From<&ClientError> for SubjectLoadError {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::NotFound => Self::NotFound,
            other => match other.status() {
                Some(status) => Self::Status(status),
                None => Self::Transport(other.to_string()),
            },
        }
    }
}

#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("subject is not loaded")]
    NotLoaded,
    #[error("reviews are not available for this subject")]
    NotAllowed,
    #[error("review submission failed: {0}")]
    Submission(#[source] ClientError),
}

/// Data the API promised but did not deliver
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("subject {0} has an empty first requirement group")]
    EmptyRequirementGroup(String),
}
