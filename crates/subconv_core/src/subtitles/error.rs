//! Errors raised while loading, converting and saving subtitles.

use std::path::PathBuf;

use crate::timestamps::TimelineError;

/// Failure of a subtitle load, save or edit.
#[derive(Debug, thiserror::Error)]
pub enum SubtitleError {
    #[error("cannot read subtitle file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot write subtitle file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Unknown or unsupported subtitle format name or extension.
    #[error("unsupported subtitle format '{0}'")]
    UnknownFormat(String),

    /// Content does not look like any supported format.
    #[error("content does not match any supported subtitle format")]
    UndetectedFormat,

    /// Frame-based format without a frame rate.
    #[error("frame-based subtitles need a frame rate and none is known")]
    UnknownFps,

    /// A time cannot be represented in the target format.
    #[error("{ms}ms is out of range for {format}")]
    TimeOverflow { ms: i64, format: &'static str },

    /// Style name not present in the file.
    #[error("no style named '{0}'")]
    StyleNotFound(String),

    /// Rename target already exists.
    #[error("a style named '{0}' is already defined")]
    StyleExists(String),

    /// Style name that cannot be written to a SubStation file.
    #[error("'{0}' cannot be used as a style name")]
    InvalidStyleName(String),

    /// Bad input to a retiming operation.
    #[error("{0}")]
    InvalidArgument(String),

    #[error(transparent)]
    ParseError(#[from] ParseError),

    #[error(transparent)]
    TimelineError(#[from] TimelineError),

    #[error("subtitle JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A malformed line in subtitle text. Line numbers start at 1.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}: malformed timestamp '{value}'")]
    InvalidTime { line: usize, value: String },

    #[error("line {line}: bad style definition ({message})")]
    InvalidStyle { line: usize, message: String },

    #[error("line {line}: bad event ({message})")]
    InvalidEvent { line: usize, message: String },

    #[error("line {line}: {message}")]
    Generic { line: usize, message: String },
}

/// Result type for subtitle operations.
pub type SubtitleResult<T> = Result<T, SubtitleError>;

impl SubtitleError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadError {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::WriteError {
            path: path.into(),
            source,
        }
    }
}

impl ParseError {
    pub fn at_line(line: usize, message: impl Into<String>) -> Self {
        Self::Generic {
            line,
            message: message.into(),
        }
    }

    pub fn invalid_time(line: usize, value: impl Into<String>) -> Self {
        Self::InvalidTime {
            line,
            value: value.into(),
        }
    }

    pub fn invalid_event(line: usize, message: impl Into<String>) -> Self {
        Self::InvalidEvent {
            line,
            message: message.into(),
        }
    }

    pub fn invalid_style(line: usize, message: impl Into<String>) -> Self {
        Self::InvalidStyle {
            line,
            message: message.into(),
        }
    }
}
