//! Timeline error types.

use std::path::PathBuf;

/// Errors that can occur while building or querying a frame timeline.
#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    /// Explicit timestamp list is too short, decreasing or constant.
    #[error("Invalid timeline: {0}")]
    InvalidTimeline(String),

    /// Frame rate outside `(0, 1000]`.
    #[error("Invalid frame rate {0}: must be greater than 0 and at most 1000")]
    InvalidFrameRate(f64),

    /// Timestamp file uses a recognised but unsupported format version.
    #[error("Timestamp file '{path}' uses unsupported format '{version}'")]
    UnsupportedTimelineFormat { path: PathBuf, version: String },

    /// Timestamp file is not a valid v2 timestamp file.
    #[error("Timestamp file '{path}' is malformed at line {line}: {message}")]
    MalformedTimelineFile {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// Failed to read a timestamp file.
    #[error("Failed to read timestamp file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// ffprobe is not installed or not executable.
    #[error("ffprobe not found or not executable")]
    MediaProbeUnavailable,

    /// ffprobe ran but returned unusable data.
    #[error("Media probe failed for '{path}': {message}")]
    MediaProbe { path: PathBuf, message: String },

    /// Negative frame or a time before the first timestamp.
    #[error("Value {value} is out of range: {message}")]
    OutOfRange { value: i64, message: &'static str },
}

impl TimelineError {
    /// Create a malformed timestamp file error.
    pub fn malformed(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self::MalformedTimelineFile {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    /// Create a media probe error.
    pub fn probe(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::MediaProbe {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type for timeline operations.
pub type TimelineResult<T> = Result<T, TimelineError>;
