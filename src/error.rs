//! Error taxonomy for the request pipeline.
//!
//! Parsing and resolution classify their failures precisely; anything
//! else ends up as [`ServeError::InternalFault`] and is answered with a 500.

use crate::http::response::StatusCode;

/// A classified failure while serving one request.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    /// Bad framing or encoding in the request line or path.
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// The method is not the retrieval verb.
    #[error("method not supported: {0}")]
    MethodNotSupported(String),

    /// The resolved target does not exist, cannot be opened, or lies outside the root.
    #[error("not found: {0}")]
    NotFound(String),

    /// Anything unexpected.
    #[error("internal fault: {0}")]
    InternalFault(String),
}

impl ServeError {
    /// Status code sent back to the client for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ServeError::MalformedRequest(_) => StatusCode::BadRequest,
            ServeError::MethodNotSupported(_) => StatusCode::MethodNotAllowed,
            ServeError::NotFound(_) => StatusCode::NotFound,
            ServeError::InternalFault(_) => StatusCode::InternalServerError,
        }
    }
}

