//! Error types for the symquery crate

use thiserror::Error;

/// Main error type for the symquery crate
///
/// Every engine variant is a broken usage contract: the caller built or drove
/// a node tree in a way the node lifecycle does not allow.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("transform node already expanded")]
    AlreadyExpanded,

    #[error("transform node not expanded: {operation}")]
    NotExpanded { operation: String },

    #[error("cannot clone expanded transformnode")]
    CloneExpanded,

    #[error(
        "attempt to sort or count transform that lacks a range. Only transforms with ranges can be sorted or counted"
    )]
    RangeRequired,

    #[error("null transform or wrong type in expand(): {filter} cannot be transformed by {transform}")]
    IncompatibleTransform { filter: String, transform: String },

    #[error("expansion of {ntransforms} transforms left no usable filter")]
    EmptyExpansion { ntransforms: usize },

    #[error("clone does not match source shape at {path}: {message}")]
    CloneShapeMismatch { path: String, message: String },

    #[error("message channel is closed")]
    ChannelClosed,

    #[error("invalid message: {reason}")]
    InvalidMessage { reason: String },

    #[error("message of {len} bytes exceeds limit of {max} bytes")]
    MessageTooLong { len: usize, max: usize },

    #[error("invalid count range '{input}': {reason}")]
    ParseRange { input: String, reason: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("formatting error while printing node tree")]
    Format(#[from] std::fmt::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
