use std::io::{self, Write};
use std::path::PathBuf;

use tracing::{debug, instrument, warn};

use wixok_base::{FilePath, PalHandle, RealPal, ResultExt, WixokError, WixokResult};

use crate::config::TxtFileConfig;
use crate::diagnostics::{self, DiagnosticOutput, Operation};
use crate::failure::FailureKind;
use crate::lines;

/// What `clear` did to the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// An existing file was truncated to zero length.
    Cleared,
    /// The file did not exist and was created empty.
    Created,
}

/* 📖 # Strict and lenient operations

Every operation comes in two forms. The `try_` form returns a `WixokResult`
whose error can be classified with `FailureKind::of`. The plain form never
fails: it returns `""`, an empty `Vec` or `false`, logs the failure with
`tracing`, and writes a diagnostic line to its `DiagnosticOutput` (stdout
unless replaced with `with_output`) when the `debug` flag of the
configuration is set.

All operations first apply the write-permission gate: an existing path without
write permission is rejected with `PermissionDenied`, reads included.
*/

/// Reads, appends to and clears plain UTF-8 text files through a PAL.
///
/// # Examples
///
/// ```
/// use wixok_base::{MockPal, PalHandle};
/// use wixok_txtfile::TxtFile;
///
/// let txt = TxtFile::new(PalHandle::new(MockPal::new()));
/// assert!(txt.add_line("todo.txt", "buy milk"));
/// assert!(txt.add_line("todo.txt", "call back"));
/// assert_eq!(txt.load("todo.txt"), "buy milk\ncall back\n");
/// assert_eq!(txt.load_lines("todo.txt"), ["buy milk", "call back"]);
/// assert!(txt.clear("todo.txt"));
/// assert_eq!(txt.load("todo.txt"), "");
/// ```
#[derive(Debug, Clone)]
pub struct TxtFile {
    pal: PalHandle,
    config: TxtFileConfig,
    output: DiagnosticOutput,
}

impl TxtFile {
    /// Create an accessor with the default (quiet) configuration.
    pub fn new(pal: PalHandle) -> Self {
        Self::with_config(pal, TxtFileConfig::default())
    }

    pub fn with_config(pal: PalHandle, config: TxtFileConfig) -> Self {
        Self {
            pal,
            config,
            output: DiagnosticOutput::stdout(),
        }
    }

    /// Send debug diagnostics to `output` instead of stdout.
    pub fn with_output(mut self, output: DiagnosticOutput) -> Self {
        self.output = output;
        self
    }

    /// Create an accessor on the real filesystem, resolving paths against `base_dir`.
    pub fn in_directory(base_dir: impl Into<PathBuf>) -> Self {
        Self::new(PalHandle::new(RealPal::new(base_dir.into())))
    }

    pub fn config(&self) -> &TxtFileConfig {
        &self.config
    }

    pub fn pal(&self) -> &PalHandle {
        &self.pal
    }

    /// Read the whole file as text, with `\r\n` and `\r` converted to `\n`.
    pub fn try_load(&self, path: impl Into<FilePath>) -> WixokResult<String> {
        let path = path.into();
        self.load_at(&path)
            .with_context(|| format!("Failed to load '{}'", path))
    }

    /// Read the file as a list of trimmed lines.
    pub fn try_load_lines(&self, path: impl Into<FilePath>) -> WixokResult<Vec<String>> {
        let path = path.into();
        self.load_lines_at(&path)
            .with_context(|| format!("Failed to read lines of '{}'", path))
    }

    /// Append `text` and a newline, creating the file if needed.
    pub fn try_add_line(&self, path: impl Into<FilePath>, text: &str) -> WixokResult<()> {
        let path = path.into();
        self.add_line_at(&path, text)
            .with_context(|| format!("Failed to add a line to '{}'", path))
    }

    /// Truncate the file to zero length, creating it if needed.
    pub fn try_clear(&self, path: impl Into<FilePath>) -> WixokResult<ClearOutcome> {
        let path = path.into();
        self.clear_at(&path)
            .with_context(|| format!("Failed to clear '{}'", path))
    }

    /// Like [`try_load`](Self::try_load), but returns `""` on failure.
    pub fn load(&self, path: impl Into<FilePath>) -> String {
        let path = path.into();
        self.load_at(&path).unwrap_or_else(|err| {
            self.report_failure(Operation::Load, &path, &err);
            String::new()
        })
    }

    /// Like [`try_load_lines`](Self::try_load_lines), but returns no lines on failure.
    pub fn load_lines(&self, path: impl Into<FilePath>) -> Vec<String> {
        let path = path.into();
        self.load_lines_at(&path).unwrap_or_else(|err| {
            self.report_failure(Operation::LoadLines, &path, &err);
            Vec::new()
        })
    }

    /// Like [`try_add_line`](Self::try_add_line), but returns whether it succeeded.
    pub fn add_line(&self, path: impl Into<FilePath>, text: &str) -> bool {
        let path = path.into();
        match self.add_line_at(&path, text) {
            Ok(()) => {
                self.report_success(diagnostics::added_message(&path));
                true
            }
            Err(err) => {
                self.report_failure(Operation::AddLine, &path, &err);
                false
            }
        }
    }

    /// Like [`try_clear`](Self::try_clear), but returns whether it succeeded.
    pub fn clear(&self, path: impl Into<FilePath>) -> bool {
        let path = path.into();
        match self.clear_at(&path) {
            Ok(outcome) => {
                self.report_success(diagnostics::cleared_message(&path, outcome));
                true
            }
            Err(err) => {
                self.report_failure(Operation::Clear, &path, &err);
                false
            }
        }
    }

    /// Rejects existing paths without write permission. Returns whether the path exists.
    fn check_write_access(&self, path: &FilePath) -> WixokResult<bool> {
        if !self.pal.file_exists(path)? {
            return Ok(false);
        }
        if self.pal.is_read_only(path)? {
            debug!("rejecting path without write permission");
            return Err(Box::new(WixokError::file_error(
                path.as_path(),
                io::Error::new(io::ErrorKind::PermissionDenied, "no write permission"),
            )));
        }
        Ok(true)
    }

    #[instrument(skip(self), fields(path = %path))]
    fn load_at(&self, path: &FilePath) -> WixokResult<String> {
        self.check_write_access(path)?;
        let text = self.pal.read_file_to_string(path)?;
        debug!(bytes = text.len(), "file loaded");
        Ok(lines::normalize_newlines(text))
    }

    fn load_lines_at(&self, path: &FilePath) -> WixokResult<Vec<String>> {
        let text = self.load_at(path)?;
        Ok(lines::split_lines(&text))
    }

    #[instrument(skip(self, text), fields(path = %path))]
    fn add_line_at(&self, path: &FilePath, text: &str) -> WixokResult<()> {
        self.check_write_access(path)?;
        let mut line = String::with_capacity(text.len() + 1);
        line.push_str(text);
        line.push('\n');

        let mut writer = self.pal.append_file(path)?;
        writer
            .write_all(line.as_bytes())
            .map_err(|e| Box::new(WixokError::file_error(path.as_path(), e)))?;
        writer
            .flush()
            .map_err(|e| Box::new(WixokError::file_error(path.as_path(), e)))?;
        debug!(bytes = line.len(), "line appended");
        Ok(())
    }

    #[instrument(skip(self), fields(path = %path))]
    fn clear_at(&self, path: &FilePath) -> WixokResult<ClearOutcome> {
        let existed = self.check_write_access(path)?;
        let mut writer = self.pal.create_file(path)?;
        writer
            .flush()
            .map_err(|e| Box::new(WixokError::file_error(path.as_path(), e)))?;
        let outcome = if existed {
            ClearOutcome::Cleared
        } else {
            ClearOutcome::Created
        };
        debug!(?outcome, "file truncated");
        Ok(outcome)
    }

    fn report_success(&self, message: String) {
        debug!("{}", message);
        if self.config.debug {
            self.output.write_line(&message);
        }
    }

    fn report_failure(&self, operation: Operation, path: &FilePath, err: &WixokError) {
        let message = diagnostics::failure_message(operation, path, err);
        match FailureKind::of(err) {
            FailureKind::Other => {
                warn!(error = %err, root_cause = %err.root_cause(), "{}", message)
            }
            _ => debug!(error = %err, "{}", message),
        }
        if self.config.debug {
            self.output.write_line(&message);
        }
    }
}
