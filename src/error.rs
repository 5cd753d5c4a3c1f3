//! Error types for boundary parsing and validation

use thiserror::Error;

/// Errors raised at the crate boundary.
///
/// Pagination and entitlement computations never fail on well-typed input;
/// these variants only come out of parsing and geometry validation.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
