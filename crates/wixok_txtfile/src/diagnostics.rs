use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;
use wixok_base::{FilePath, WixokError};

use crate::failure::FailureKind;
use crate::txtfile::ClearOutcome;

/// The four text file operations, as named in diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    LoadLines,
    AddLine,
    Clear,
}

impl Operation {
    fn permission_activity(self) -> &'static str {
        match self {
            Self::Load | Self::LoadLines => "reading file",
            Self::AddLine => "writing to file",
            Self::Clear => "clearing file",
        }
    }

    fn unexpected_activity(self) -> &'static str {
        match self {
            Self::Load => "loading file",
            Self::LoadLines => "reading file",
            Self::AddLine => "adding text to file",
            Self::Clear => "clearing file",
        }
    }
}

/// Human-readable description of a failed operation.
pub fn failure_message(operation: Operation, path: &FilePath, error: &WixokError) -> String {
    match FailureKind::of(error) {
        FailureKind::NotFound => format!("Error: File '{}' not found.", path),
        FailureKind::PermissionDenied => format!(
            "Error: Permission denied while {} '{}'.",
            operation.permission_activity(),
            path
        ),
        FailureKind::DecodeError => format!(
            "Error: File '{}' contains invalid or non-text characters.",
            path
        ),
        FailureKind::IsADirectory => format!("Error: '{}' is a directory, not a file.", path),
        FailureKind::Other => format!(
            "Unexpected error while {} '{}': {}",
            operation.unexpected_activity(),
            path,
            error
        ),
    }
}

/// Description of a successful `add_line`.
pub fn added_message(path: &FilePath) -> String {
    format!("Text added successfully to '{}'.", path)
}

/// Description of a successful `clear`.
pub fn cleared_message(path: &FilePath, outcome: ClearOutcome) -> String {
    match outcome {
        ClearOutcome::Cleared => format!("File '{}' cleared successfully.", path),
        ClearOutcome::Created => format!("File '{}' created and cleared successfully.", path),
    }
}

/// Destination of the diagnostic lines printed in debug mode.
///
/// Clones share the same writer. The default writes to stdout.
#[derive(Clone)]
pub struct DiagnosticOutput(Arc<Mutex<dyn Write + Send>>);

impl DiagnosticOutput {
    pub fn new(writer: impl Write + Send + 'static) -> Self {
        Self(Arc::new(Mutex::new(writer)))
    }

    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// Writes `message` followed by a newline. Write errors are logged, not returned.
    pub fn write_line(&self, message: &str) {
        let mut writer = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        let result = writeln!(writer, "{}", message);
        if let Err(e) = result.and_then(|()| writer.flush()) {
            debug!(error = %e, "failed to write diagnostic");
        }
    }
}

impl Default for DiagnosticOutput {
    fn default() -> Self {
        Self::stdout()
    }
}

impl fmt::Debug for DiagnosticOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DiagnosticOutput")
    }
}
