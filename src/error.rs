//! Error types for nbprofile library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for nbprofile operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading, measuring or rendering notebooks.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The input path does not exist.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The notebook JSON is malformed or lacks a cells array.
    #[error("Notebook parsing error: {0}")]
    Parse(String),

    /// The file is not a notebook and no text format reader applies.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Reading rate must be a positive number of words per minute.
    #[error("Invalid reading rate: {0} (must be a positive number of words per minute)")]
    InvalidRate(i64),

    /// Error while laying out or writing the chart image.
    #[error("Rendering error: {0}")]
    Render(String),

    /// A rendering or loading option is out of range.
    #[error("Invalid option: {0}")]
    InvalidOption(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidRate(0);
        assert_eq!(
            err.to_string(),
            "Invalid reading rate: 0 (must be a positive number of words per minute)"
        );

        let err = Error::FileNotFound(PathBuf::from("missing.ipynb"));
        assert_eq!(err.to_string(), "File not found: missing.ipynb");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Parse(_)));
    }
}
