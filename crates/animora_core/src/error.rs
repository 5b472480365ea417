//! Error types

use thiserror::Error;

/// Configuration-level failures.
///
/// Animation call sites never return these; they surface only where input is
/// parsed or validated (keyframe keys, selectors, headless run configuration).
#[derive(Error, Debug)]
pub enum Error {
    /// A keyframe key was not a number
    #[error("invalid keyframe key '{0}'")]
    InvalidKeyframeKey(String),

    /// A selector could not be parsed
    #[error("invalid selector '{0}'")]
    InvalidSelector(String),

    /// Runtime configuration rejected
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type for fallible configuration paths
pub type Result<T> = std::result::Result<T, Error>;
