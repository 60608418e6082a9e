use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("resource not found")]
    NotFound,
    #[error("not authenticated")]
    Unauthorized,
    #[error("access denied")]
    Forbidden,
    #[error("request failed with status {0}")]
    Status(u16),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

impl ClientError {
    /// Map a non-success HTTP status to its error variant
    pub const fn from_status(status: u16) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            other => Self::Status(other),
        }
    }

    /// HTTP status associated with the error, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::NotFound => Some(404),
            Self::Unauthorized => Some(401),
            Self::Forbidden => Some(403),
            Self::Status(status) => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            Self::InvalidUrl(_) | Self::Validation(_) => None,
        }
    }

    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// 401 and 403 both mean "log in (as someone else) to see this"
    pub const fn is_access_denied(&self) -> bool {
        matches!(self, Self::Unauthorized | Self::Forbidden)
    }
}
