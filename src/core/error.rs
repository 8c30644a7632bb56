//! Error types for the crate

use std::path::PathBuf;
use thiserror::Error;

/// Crate-wide error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Bundle not found: {}", .0.display())]
    ResourceNotFound(PathBuf),

    #[error("Parse error in {} (line {line}): {reason}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether this error came from loading a bundle (missing, unreadable or malformed)
    pub fn is_load_error(&self) -> bool {
        matches!(
            self,
            Error::ResourceNotFound(_) | Error::Parse { .. } | Error::Io(_)
        )
    }
}

/// Result type alias using our Error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_classification() {
        assert!(Error::ResourceNotFound(PathBuf::from("a.properties")).is_load_error());
        assert!(Error::Parse {
            path: PathBuf::from("a.properties"),
            line: 3,
            reason: "bad escape".into(),
        }
        .is_load_error());
        assert!(!Error::Config("missing bundle".into()).is_load_error());
    }

    #[test]
    fn test_parse_error_message() {
        let err = Error::Parse {
            path: PathBuf::from("msg.properties"),
            line: 7,
            reason: "invalid \\u escape".into(),
        };
        let text = err.to_string();
        assert!(text.contains("msg.properties"));
        assert!(text.contains("line 7"));
    }
}
