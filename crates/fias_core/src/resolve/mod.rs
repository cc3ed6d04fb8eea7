//! Resolution pipeline: classification, attribute and version selection,
//! slot population and formatting.
//!
//! Every stage is a pure function over decoded model types; the service
//! layer owns ordering and logging. All stages share [`ComposeError`], and
//! any error aborts the whole composition. A partially resolved address is
//! never returned.

use std::error::Error;
use std::fmt;

use crate::model::node::NodeDecodeError;

pub mod attrs;
pub mod format;
pub mod level;
pub mod populate;
pub mod version;

pub type ComposeResult<T> = Result<T, ComposeError>;

/// Fatal composition failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposeError {
    /// The target or an ancestor maps to no abstract level (stead,
    /// car-place, unrecognized kind or level code).
    UnsupportedLevel,
    /// Structurally broken payload: bad path, bad JSON, misaligned parents,
    /// missing required fields.
    MalformedPayload(String),
    /// A node carried no attribute snapshot at all.
    EmptyAttributeSet { object_id: i64 },
    /// A node carried no version record.
    NoVersionRecord { object_id: i64 },
}

impl fmt::Display for ComposeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Wire-visible message, relied on by downstream consumers.
            ComposeError::UnsupportedLevel => write!(f, "Unsupported address level."),
            ComposeError::MalformedPayload(details) => {
                write!(f, "malformed address payload: {details}")
            }
            ComposeError::EmptyAttributeSet { object_id } => {
                write!(f, "no attribute snapshot for object {object_id}")
            }
            ComposeError::NoVersionRecord { object_id } => {
                write!(f, "no version record for object {object_id}")
            }
        }
    }
}

impl Error for ComposeError {}

impl From<NodeDecodeError> for ComposeError {
    fn from(err: NodeDecodeError) -> Self {
        match err {
            NodeDecodeError::UnknownLevel { .. } => ComposeError::UnsupportedLevel,
            NodeDecodeError::MissingName { .. } => {
                ComposeError::MalformedPayload(err.to_string())
            }
        }
    }
}
