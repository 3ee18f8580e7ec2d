//! Error taxonomy shared by the whole crate.
//!
//! Every failure is raised synchronously at the violating call; nothing is
//! deferred or retried. Validation always runs before any cached statistic is
//! touched, so a failed call leaves partitions, tables and scorers unchanged.

use thiserror::Error;

/// The result type used throughout this crate.
pub type Result<T> = std::result::Result<T, McmError>;

/// All errors this crate can produce.
#[derive(Debug, Error)]
pub enum McmError {
    /// An index or alphabet value is out of bounds.
    #[error("{0}")]
    Range(String),

    /// A partition input has the wrong rank (not a vector or a matrix).
    #[error("{0}")]
    Shape(String),

    /// An input has the right shape but invalid cell values.
    #[error("{0}")]
    Value(String),

    /// An operation was attempted against the wrong membership or engine
    /// state, such as moving an unassigned variable out of a partition or
    /// querying a search engine before any run.
    #[error("{0}")]
    State(String),

    /// A persisted dataset is malformed.
    #[error("{0}")]
    Format(String),

    /// An underlying I/O error while reading or writing a dataset file.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl McmError {
    pub(crate) fn range(msg: impl Into<String>) -> Self {
        McmError::Range(msg.into())
    }

    pub(crate) fn shape(msg: impl Into<String>) -> Self {
        McmError::Shape(msg.into())
    }

    pub(crate) fn value(msg: impl Into<String>) -> Self {
        McmError::Value(msg.into())
    }

    pub(crate) fn state(msg: impl Into<String>) -> Self {
        McmError::State(msg.into())
    }

    pub(crate) fn format(msg: impl Into<String>) -> Self {
        McmError::Format(msg.into())
    }
}
