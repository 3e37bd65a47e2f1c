use crate::models::Field;

#[derive(Debug, thiserror::Error)]
pub enum FipeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("{0} is disabled until its upstream fields are set")]
    FieldDisabled(Field),
}

impl FipeError {
    /// True for transport-level failures (connect, timeout, bad status, undecodable body).
    pub fn is_network_failure(&self) -> bool {
        matches!(self, FipeError::Http(_))
    }
}

pub type Result<T> = std::result::Result<T, FipeError>;
