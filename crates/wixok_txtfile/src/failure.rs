use std::fmt;
use std::io;

use wixok_base::{ErrorKind, WixokError};

/// Category of a failed text file operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The file (or a parent directory) does not exist.
    NotFound,
    /// The operating system refused access, or the file exists without write permission.
    PermissionDenied,
    /// The file contents are not valid UTF-8.
    DecodeError,
    /// The path names a directory.
    IsADirectory,
    /// Anything else.
    Other,
}

impl FailureKind {
    /// Classifies an error returned by a strict `TxtFile` operation.
    pub fn of(error: &WixokError) -> Self {
        match error.kind() {
            ErrorKind::FileError { source, .. } => match source.kind() {
                io::ErrorKind::NotFound => Self::NotFound,
                io::ErrorKind::PermissionDenied => Self::PermissionDenied,
                io::ErrorKind::IsADirectory => Self::IsADirectory,
                _ => Self::Other,
            },
            ErrorKind::InvalidUtf8 { .. } => Self::DecodeError,
            ErrorKind::Message { .. } => Self::Other,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotFound => "not found",
            Self::PermissionDenied => "permission denied",
            Self::DecodeError => "decode error",
            Self::IsADirectory => "is a directory",
            Self::Other => "other",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn io_failure(kind: io::ErrorKind) -> WixokError {
        WixokError::file_error("notes.txt", io::Error::new(kind, "boom"))
    }

    #[test]
    fn test_classifies_io_errors() {
        assert_eq!(
            FailureKind::of(&io_failure(io::ErrorKind::NotFound)),
            FailureKind::NotFound
        );
        assert_eq!(
            FailureKind::of(&io_failure(io::ErrorKind::PermissionDenied)),
            FailureKind::PermissionDenied
        );
        assert_eq!(
            FailureKind::of(&io_failure(io::ErrorKind::IsADirectory)),
            FailureKind::IsADirectory
        );
        assert_eq!(
            FailureKind::of(&io_failure(io::ErrorKind::WriteZero)),
            FailureKind::Other
        );
    }

    #[test]
    fn test_classifies_decode_and_message_errors() {
        let decode = WixokError::new(ErrorKind::InvalidUtf8 {
            path: "bad.txt".into(),
            source: String::from_utf8(vec![0xFF]).unwrap_err(),
        });
        assert_eq!(FailureKind::of(&decode), FailureKind::DecodeError);
        assert_eq!(
            FailureKind::of(&WixokError::message("odd")),
            FailureKind::Other
        );
    }

    #[test]
    fn test_context_does_not_change_classification() {
        let error = io_failure(io::ErrorKind::NotFound).context("loading 'notes.txt'");
        assert_eq!(FailureKind::of(&error), FailureKind::NotFound);
    }

    #[test]
    fn test_display() {
        assert_eq!(FailureKind::IsADirectory.to_string(), "is a directory");
        assert_eq!(FailureKind::DecodeError.to_string(), "decode error");
    }
}
