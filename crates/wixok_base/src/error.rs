use std::error::Error as StdError;
use std::fmt;
use std::path::PathBuf;
use std::string::FromUtf8Error;

use tracing_error::{SpanTrace, SpanTraceStatus};

/* 📖 # One error type for the whole workspace

Every fallible operation in wixok returns `WixokResult<T>`. The error carries a
structural `ErrorKind` that callers can match on, a list of context strings
attached while the error propagates, an optional cause, and the span trace
that was active when the error was created.
 */

/// Error variants that can occur in wixok operations.
/// Each variant represents a specific error category with its associated context.
#[derive(Debug)]
pub enum ErrorKind {
    /// File system operation failed
    FileError {
        path: PathBuf,
        source: std::io::Error,
    },

    /// File contents could not be decoded as UTF-8
    InvalidUtf8 {
        path: PathBuf,
        source: FromUtf8Error,
    },

    /// Catch-all for other errors with a message
    Message { message: String },
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::FileError { path, source } => {
                write!(f, "File error at {}: {}", path.display(), source)
            }
            ErrorKind::InvalidUtf8 { path, source } => {
                write!(f, "File is not valid UTF-8: {}: {}", path.display(), source)
            }
            ErrorKind::Message { message } => write!(f, "{}", message),
        }
    }
}

/// Error type wrapping an [`ErrorKind`] with context, an optional cause and a span trace.
pub struct WixokError {
    kind: ErrorKind,
    context: Vec<String>,
    cause: Option<Box<WixokError>>,
    span_trace: SpanTrace,
}

impl WixokError {
    /// Creates a new error from an ErrorKind, capturing the current span trace.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: vec![],
            cause: None,
            span_trace: SpanTrace::capture(),
        }
    }

    /// Creates a `Message` error.
    pub fn message(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Message {
            message: message.into(),
        })
    }

    /// Creates a `FileError` for the given path.
    pub fn file_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::new(ErrorKind::FileError {
            path: path.into(),
            source,
        })
    }

    /// Attaches context to an error.
    /// Context is displayed before the error message.
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Attaches context using lazy evaluation.
    pub fn with_context<F>(mut self, f: F) -> Self
    where
        F: FnOnce() -> String,
    {
        self.context.push(f());
        self
    }

    /// Records the error that caused this one.
    pub fn caused_by(mut self, cause: WixokError) -> Self {
        self.cause = Some(Box::new(cause));
        self
    }

    /// Returns a reference to the underlying ErrorKind.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the context strings, in the order they were attached.
    pub fn get_context(&self) -> &[String] {
        &self.context
    }

    /// Returns the error this one was caused by, if any.
    pub fn cause(&self) -> Option<&WixokError> {
        self.cause.as_deref()
    }

    /// Returns the span trace captured when the error was created.
    pub fn span_trace(&self) -> &SpanTrace {
        &self.span_trace
    }

    /// Returns the innermost error in the chain.
    pub fn root_cause(&self) -> &(dyn StdError + 'static) {
        let mut current: &(dyn StdError + 'static) = self;
        while let Some(next) = current.source() {
            current = next;
        }
        current
    }

    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, indent: &str) -> fmt::Result {
        let branches = self.context.len() + usize::from(self.cause.is_some());
        for (i, ctx) in self.context.iter().enumerate() {
            let connector = if i + 1 == branches { "└─" } else { "├─" };
            writeln!(f, "{}{} {}", indent, connector, ctx)?;
        }
        if let Some(cause) = &self.cause {
            writeln!(f, "{}└─ cause: {}", indent, cause.kind)?;
            cause.fmt_tree(f, &format!("{}   ", indent))?;
        }
        Ok(())
    }
}

impl From<ErrorKind> for WixokError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl StdError for WixokError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match &self.kind {
            ErrorKind::FileError { source, .. } => Some(source),
            ErrorKind::InvalidUtf8 { source, .. } => Some(source),
            ErrorKind::Message { .. } => self
                .cause
                .as_deref()
                .map(|cause| cause as &(dyn StdError + 'static)),
        }
    }
}

impl fmt::Display for WixokError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ctx in &self.context {
            write!(f, "{}: ", ctx)?;
        }
        write!(f, "{}", self.kind)?;
        if let Some(cause) = &self.cause {
            write!(f, ": {}", cause)?;
        }
        Ok(())
    }
}

impl fmt::Debug for WixokError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.kind)?;
        self.fmt_tree(f, "")?;
        if self.span_trace.status() == SpanTraceStatus::CAPTURED {
            writeln!(f, "Trace: {}", self.span_trace)?;
        }
        Ok(())
    }
}

/// Standard result type for wixok operations.
/// The error is boxed to keep the `Ok` path small.
pub type WixokResult<T> = std::result::Result<T, Box<WixokError>>;

/// Extension trait for attaching context to Results during propagation.
pub trait ResultExt<T> {
    /// Attaches context to an error, consuming and re-wrapping it.
    fn context(self, context: impl Into<String>) -> WixokResult<T>;

    /// Attaches context using lazy evaluation.
    /// Context is only evaluated if the result is an error.
    fn with_context<F>(self, f: F) -> WixokResult<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for WixokResult<T> {
    fn context(self, context: impl Into<String>) -> WixokResult<T> {
        self.map_err(|err| Box::new(err.context(context)))
    }

    fn with_context<F>(self, f: F) -> WixokResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|err| Box::new(err.with_context(f)))
    }
}

/// Builds a boxed `Message` error from format arguments.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        ::std::boxed::Box::new($crate::WixokError::message(format!($($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_from_file_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let path = PathBuf::from("test.txt");
        let error = WixokError::file_error(path.clone(), io_err);

        match error.kind() {
            ErrorKind::FileError { path: p, source } => {
                assert_eq!(p, &path);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            _ => panic!("Expected FileError variant"),
        }
    }

    #[test]
    fn test_error_from_invalid_utf8() {
        let utf8_err = String::from_utf8(vec![0xFF, 0xFE]).unwrap_err();
        let error = WixokError::new(ErrorKind::InvalidUtf8 {
            path: PathBuf::from("bad.txt"),
            source: utf8_err,
        });

        assert!(matches!(error.kind(), ErrorKind::InvalidUtf8 { .. }));
        assert!(error.to_string().starts_with("File is not valid UTF-8: bad.txt"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_error_context_attachment() {
        let error = WixokError::message("original error")
            .context("first context")
            .context("second context");

        assert_eq!(error.get_context(), ["first context", "second context"]);
    }

    #[test]
    fn test_error_with_context_lazy_evaluation() {
        let mut called = false;
        let error = WixokError::message("error").with_context(|| {
            called = true;
            "lazy context".to_string()
        });

        assert!(called);
        assert_eq!(error.get_context()[0], "lazy context");
    }

    #[test]
    fn test_error_display_message_only() {
        let error = WixokError::message("test message");
        assert_eq!(error.to_string(), "test message");
    }

    #[test]
    fn test_error_display_with_multiple_contexts() {
        let error = WixokError::message("root error")
            .context("first")
            .context("second")
            .context("third");
        assert_eq!(error.to_string(), "first: second: third: root error");
    }

    #[test]
    fn test_error_display_file_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "not found");
        let error = WixokError::file_error("/tmp/test.txt", io_err);
        let display = error.to_string();
        assert!(display.contains("/tmp/test.txt"));
        assert!(display.contains("not found"));
    }

    #[test]
    fn test_error_source_message() {
        let error = WixokError::message("test");
        assert!(error.source().is_none());
    }

    #[test]
    fn test_error_source_cause() {
        let error = WixokError::message("outer").caused_by(WixokError::message("inner"));
        assert_eq!(error.source().map(|s| s.to_string()).as_deref(), Some("inner"));
        assert_eq!(error.cause().map(|c| c.to_string()).as_deref(), Some("inner"));
    }

    #[test]
    fn test_error_display_with_cause() {
        let error = WixokError::message("outer")
            .context("while testing")
            .caused_by(WixokError::message("inner").context("deeper"));
        assert_eq!(error.to_string(), "while testing: outer: deeper: inner");
    }

    #[test]
    fn test_error_root_cause_file_error() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "not found");
        let error = WixokError::file_error("test.txt", io_err);
        assert_eq!(error.root_cause().to_string(), "not found");
    }

    #[test]
    fn test_error_root_cause_through_cause_chain() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let error = WixokError::message("outer")
            .caused_by(WixokError::file_error("test.txt", io_err));
        assert_eq!(error.root_cause().to_string(), "access denied");
    }

    #[test]
    fn test_result_ext_context_success() {
        let result: WixokResult<i32> = Ok(42);
        assert_eq!(result.context("operation failed").unwrap(), 42);
    }

    #[test]
    fn test_result_ext_chaining() {
        let result: WixokResult<i32> = Err(Box::new(WixokError::message("root")));
        let err = result
            .context("step 1")
            .context("step 2")
            .with_context(|| "step 3".to_string())
            .unwrap_err();
        assert_eq!(err.to_string(), "step 1: step 2: step 3: root");
    }

    #[test]
    fn test_err_macro() {
        let error: Box<WixokError> = crate::err!("bad value: {}", 7);
        assert_eq!(error.to_string(), "bad value: 7");
        assert!(matches!(error.kind(), ErrorKind::Message { .. }));
    }
}
