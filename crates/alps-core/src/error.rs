use std::collections::TryReserveError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AlpsError {
    #[error("Allocation error: {0}")]
    Allocation(String),

    #[error("Domain error: {0}")]
    Domain(String),

    #[error("Construction error: {0}")]
    Construction(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<TryReserveError> for AlpsError {
    fn from(err: TryReserveError) -> Self {
        AlpsError::Allocation(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AlpsError>;
