//! # Errors
//!
//! Error types used in the library

use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Prefix of every tokenizer error message
pub const INVALID_INPUT_MSG: &str = "Invalid input";

/// Invalid input error
///
/// Contains the reason for the error.
///
/// # Examples
/// - `cd \`
/// - `cd '`
/// - `cd '''`
/// - `cd "`
/// - `cd """`
#[derive(Debug, Error, PartialEq)]
#[error("{}: {}", INVALID_INPUT_MSG, .reason)]
pub struct InvalidInputError {
    pub reason: String,
}

/// What went wrong while talking to the storage service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeErrorKind {
    /// The request never got a response
    Transport,
    /// The service answered with an error
    Service,
    /// The request was cancelled or timed out
    Cancelled,
}

impl Display for ProbeErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let kind = match self {
            ProbeErrorKind::Transport => "transport error",
            ProbeErrorKind::Service => "service error",
            ProbeErrorKind::Cancelled => "request cancelled",
        };

        write!(f, "{kind}")
    }
}

/// A failure reported by a storage collaborator
///
/// Commands never wrap or retry it; it reaches the user exactly as the store produced it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct ProbeError {
    pub kind: ProbeErrorKind,
    pub message: String,
}

impl ProbeError {
    pub fn new(kind: ProbeErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Errors returned by [`crate::cmd::Command::execute`]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    /// The requested path is structurally impossible, e.g. it ascends past the root
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// The storage service confirmed that the target does not exist
    #[error("{0}: No such bucket or directory")]
    TargetNotFound(String),

    /// Whatever the storage service returned, untouched
    #[error(transparent)]
    Probe(#[from] ProbeError),

    /// Malformed arguments
    #[error("{0}")]
    Usage(String),

    /// The verb is not a builtin
    #[error("{0}: command not found")]
    UnknownCommand(String),
}

/// Errors that can occur while loading a store manifest
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read manifest '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid bucket name in manifest: {0:?}")]
    InvalidBucket(String),
}
