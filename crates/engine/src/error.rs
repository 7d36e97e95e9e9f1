//! The module contains the errors the engine can return.
//!
//! The errors are:
//!
//! - [`Validation`] returned when user input is rejected before reaching the store.
//! - [`CategoryInUse`] returned when a category still has operations referencing it.
//! - [`Gateway`] returned when the remote store could not serve a request.
//!
//!  [`Validation`]: EngineError::Validation
//!  [`CategoryInUse`]: EngineError::CategoryInUse
//!  [`Gateway`]: EngineError::Gateway
use thiserror::Error;

/// Message carried by [`EngineError::CategoryInUse`].
pub const CATEGORY_IN_USE_MESSAGE: &str =
    "Cannot delete category with associated operations. Please reassign or delete operations first.";

/// Failure talking to the remote store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The request never produced a response (connection refused, timeout, ...).
    #[error("transport error: {0}")]
    Transport(String),
    /// The store answered with a non-2xx status.
    #[error("{status}: {message}")]
    Status { status: u16, message: String },
    /// The response body did not match the expected shape.
    #[error("invalid response: {0}")]
    Decode(String),
    #[error("invalid base url: {0}")]
    InvalidUrl(String),
}

/// Engine custom errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("{0}")]
    CategoryInUse(String),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl EngineError {
    pub(crate) fn category_in_use() -> Self {
        Self::CategoryInUse(CATEGORY_IN_USE_MESSAGE.to_string())
    }
}
