use std::io::{Read, Write};
use std::sync::Arc;

use crate::error::ErrorKind;
use crate::{WixokError, WixokResult};

use super::file_path::FilePath;

/* 📖 # What is the Platform Abstraction Layer (PAL)?

All file access in wixok goes through the `Pal` trait. `RealPal` forwards to
`std::fs` relative to a base directory, `MockPal` keeps files in memory.
Accessor code only ever sees a `PalHandle`, so the same operations run against
either implementation.
*/

/// Platform Abstraction Layer (PAL) trait providing filesystem operations.
///
/// Two implementations are provided:
/// - `RealPal`: Uses the real filesystem via `std::fs`
/// - `MockPal`: In-memory implementation for testing
pub trait Pal: std::fmt::Debug + Send + Sync + 'static {
    /// Check if a file or directory exists at the given path.
    fn file_exists(&self, path: &FilePath) -> WixokResult<bool>;

    /// Check whether the calling process lacks write permission on the existing entry at `path`.
    fn is_read_only(&self, path: &FilePath) -> WixokResult<bool>;

    /// Open a file for reading.
    fn read_file(&self, path: &FilePath) -> WixokResult<Box<dyn Read + 'static>>;

    /// Read entire file contents as a UTF-8 string.
    ///
    /// Read failures are reported as `ErrorKind::FileError`, undecodable
    /// contents as `ErrorKind::InvalidUtf8`.
    fn read_file_to_string(&self, path: &FilePath) -> WixokResult<String> {
        let mut reader = self.read_file(path)?;
        let mut contents = Vec::new();
        reader
            .read_to_end(&mut contents)
            .map_err(|e| Box::new(WixokError::file_error(path.as_path(), e)))?;
        String::from_utf8(contents).map_err(|e| {
            Box::new(WixokError::new(ErrorKind::InvalidUtf8 {
                path: path.as_path().to_path_buf(),
                source: e,
            }))
        })
    }

    /// Create a file, truncating it if it exists.
    fn create_file(&self, path: &FilePath) -> WixokResult<Box<dyn Write>>;

    /// Open a file for appending, creating it if it does not exist.
    fn append_file(&self, path: &FilePath) -> WixokResult<Box<dyn Write>>;
}

/// Handle to a PAL implementation, enabling shared ownership.
///
/// Internally wraps `Arc<dyn Pal>` for cheap cloning and thread-safe sharing.
///
/// # Examples
///
/// ```no_run
/// use wixok_base::{RealPal, PalHandle};
///
/// let pal = PalHandle::new(RealPal::new(".".into()));
/// let pal_clone = pal.clone();
/// ```
#[derive(Debug, Clone)]
pub struct PalHandle(Arc<dyn Pal>);

impl PalHandle {
    /// Create a new PalHandle from a Pal implementation.
    pub fn new(pal: impl Pal + 'static) -> Self {
        Self(Arc::new(pal))
    }
}

impl std::ops::Deref for PalHandle {
    type Target = dyn Pal;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}
