//! Error types for the SimBridge data model and handle layer

use thiserror::Error;

/// Coarse failure classes reported across the foreign-call boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidHandle,
    InvalidArgument,
    ParseError,
    TypeMismatch,
    OutOfRange,
}

/// Core SimBridge errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    // Handle errors
    #[error("Invalid argument: handle {0} is invalid")]
    InvalidHandle(u64),

    #[error("Invalid argument: handle {handle} is of type {actual}, which does not support the {expected} interface")]
    TypeMismatch {
        handle: u64,
        expected: &'static str,
        actual: &'static str,
    },

    // Argument errors
    #[error("Invalid argument: unexpected NULL string")]
    NullString,

    #[error("Invalid argument: identifiers must not be empty")]
    EmptyIdentifier,

    #[error("Invalid argument: {0:?} is not a valid identifier; it contains characters outside [a-zA-Z0-9_]")]
    InvalidIdentifier(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // Payload errors
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Index out of range: {0}")]
    OutOfRange(String),
}

impl BridgeError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            BridgeError::InvalidHandle(_) => ErrorKind::InvalidHandle,
            BridgeError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            BridgeError::NullString
            | BridgeError::EmptyIdentifier
            | BridgeError::InvalidIdentifier(_)
            | BridgeError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            BridgeError::ParseError(_) => ErrorKind::ParseError,
            BridgeError::OutOfRange(_) => ErrorKind::OutOfRange,
        }
    }

    /// Shorthand for an `InvalidArgument` with a formatted message
    pub fn inv_arg(msg: impl Into<String>) -> Self {
        BridgeError::InvalidArgument(msg.into())
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(e: serde_json::Error) -> Self {
        BridgeError::ParseError(e.to_string())
    }
}

/// Result type for SimBridge operations
pub type BridgeResult<T> = Result<T, BridgeError>;
