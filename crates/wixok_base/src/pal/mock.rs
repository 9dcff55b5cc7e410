use std::collections::{HashMap, HashSet};
use std::io::{Cursor, ErrorKind as IoErrorKind, Read, Write};
use std::sync::{Arc, Mutex};

use crate::{WixokError, WixokResult};

use super::FilePath;
use super::traits::Pal;

/* 📖 # How MockPal models the filesystem

Files are byte vectors in a map keyed by `FilePath`. Directories and
read-only entries are tracked as sets of paths. Opening a directory as a file
fails with `IsADirectory`, writing to a read-only file fails with
`PermissionDenied`, reading a missing file fails with `NotFound`; these mirror
the io error kinds `RealPal` sees from the operating system.
*/

/// In-memory PAL implementation for testing.
///
/// # Examples
///
/// ```
/// use wixok_base::{pal::MockPal, Pal, FilePath};
///
/// let mock = MockPal::new();
/// mock.add_file(FilePath::from("test.txt"), b"content".to_vec());
/// let content = mock.read_file_to_string(&FilePath::from("test.txt")).unwrap();
/// assert_eq!(content, "content");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockPal {
    files: Arc<Mutex<HashMap<FilePath, Vec<u8>>>>,
    directories: Arc<Mutex<HashSet<FilePath>>>,
    read_only: Arc<Mutex<HashSet<FilePath>>>,
}

impl MockPal {
    /// Create a new empty MockPal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file to the mock storage, replacing any previous content.
    pub fn add_file(&self, path: FilePath, content: Vec<u8>) {
        self.files.lock().unwrap().insert(path, content);
    }

    /// Add a directory to the mock storage.
    pub fn add_directory(&self, path: FilePath) {
        self.directories.lock().unwrap().insert(path);
    }

    /// Mark an entry as read-only (or writable again).
    pub fn set_read_only(&self, path: FilePath, read_only: bool) {
        let mut entries = self.read_only.lock().unwrap();
        if read_only {
            entries.insert(path);
        } else {
            entries.remove(&path);
        }
    }

    /// Raw content of a file, bypassing all checks.
    pub fn file_content(&self, path: &FilePath) -> Option<Vec<u8>> {
        self.files.lock().unwrap().get(path).cloned()
    }

    fn io_error(path: &FilePath, kind: IoErrorKind, message: &str) -> Box<WixokError> {
        Box::new(WixokError::file_error(
            path.as_path(),
            std::io::Error::new(kind, format!("{}: {}", message, path)),
        ))
    }

    /// Fail the way an OS would when opening `path` for writing.
    fn check_writable(&self, path: &FilePath) -> WixokResult<()> {
        if self.directories.lock().unwrap().contains(path) {
            return Err(Self::io_error(path, IoErrorKind::IsADirectory, "Is a directory"));
        }
        if self.read_only.lock().unwrap().contains(path) {
            return Err(Self::io_error(
                path,
                IoErrorKind::PermissionDenied,
                "Permission denied",
            ));
        }
        Ok(())
    }
}

impl Pal for MockPal {
    fn file_exists(&self, path: &FilePath) -> WixokResult<bool> {
        let is_file = self.files.lock().unwrap().contains_key(path);
        Ok(is_file || self.directories.lock().unwrap().contains(path))
    }

    fn is_read_only(&self, path: &FilePath) -> WixokResult<bool> {
        if !self.file_exists(path)? {
            return Err(Self::io_error(path, IoErrorKind::NotFound, "File not found"));
        }
        Ok(self.read_only.lock().unwrap().contains(path))
    }

    fn read_file(&self, path: &FilePath) -> WixokResult<Box<dyn Read + 'static>> {
        if self.directories.lock().unwrap().contains(path) {
            return Err(Self::io_error(path, IoErrorKind::IsADirectory, "Is a directory"));
        }
        let files = self.files.lock().unwrap();
        let content = files
            .get(path)
            .ok_or_else(|| Self::io_error(path, IoErrorKind::NotFound, "File not found"))?
            .clone();
        Ok(Box::new(Cursor::new(content)))
    }

    fn create_file(&self, path: &FilePath) -> WixokResult<Box<dyn Write>> {
        self.check_writable(path)?;
        self.files.lock().unwrap().insert(path.clone(), Vec::new());
        Ok(Box::new(MockFileWriter {
            path: path.clone(),
            files: Arc::clone(&self.files),
            buffer: Vec::new(),
        }))
    }

    fn append_file(&self, path: &FilePath) -> WixokResult<Box<dyn Write>> {
        self.check_writable(path)?;
        self.files
            .lock()
            .unwrap()
            .entry(path.clone())
            .or_default();
        Ok(Box::new(MockFileWriter {
            path: path.clone(),
            files: Arc::clone(&self.files),
            buffer: Vec::new(),
        }))
    }
}

/// Writer that appends its buffered bytes to the mock storage when flushed or dropped.
struct MockFileWriter {
    path: FilePath,
    files: Arc<Mutex<HashMap<FilePath, Vec<u8>>>>,
    buffer: Vec<u8>,
}

impl Write for MockFileWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if !self.buffer.is_empty() {
            let mut files = self.files.lock().unwrap();
            files
                .entry(self.path.clone())
                .or_default()
                .append(&mut self.buffer);
        }
        Ok(())
    }
}

impl Drop for MockFileWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    fn io_kind(err: &WixokError) -> IoErrorKind {
        match err.kind() {
            ErrorKind::FileError { source, .. } => source.kind(),
            other => panic!("Expected FileError, got {:?}", other),
        }
    }

    #[test]
    fn test_file_exists() {
        let pal = MockPal::new();
        pal.add_file(FilePath::from("test.txt"), b"content".to_vec());
        pal.add_directory(FilePath::from("dir"));

        assert!(pal.file_exists(&FilePath::from("test.txt")).unwrap());
        assert!(pal.file_exists(&FilePath::from("dir")).unwrap());
        assert!(!pal.file_exists(&FilePath::from("other.txt")).unwrap());
    }

    #[test]
    fn test_read_file_not_found() {
        let pal = MockPal::new();

        let err = pal
            .read_file_to_string(&FilePath::from("nonexistent.txt"))
            .unwrap_err();
        assert_eq!(io_kind(&err), IoErrorKind::NotFound);
    }

    #[test]
    fn test_read_directory() {
        let pal = MockPal::new();
        pal.add_directory(FilePath::from("dir"));

        let err = pal.read_file_to_string(&FilePath::from("dir")).unwrap_err();
        assert_eq!(io_kind(&err), IoErrorKind::IsADirectory);
    }

    #[test]
    fn test_create_file_truncates() {
        let pal = MockPal::new();
        pal.add_file(FilePath::from("test.txt"), b"old".to_vec());

        let mut writer = pal.create_file(&FilePath::from("test.txt")).unwrap();
        writer.write_all(b"new").unwrap();
        drop(writer);

        assert_eq!(
            pal.file_content(&FilePath::from("test.txt")),
            Some(b"new".to_vec())
        );
    }

    #[test]
    fn test_create_file_without_writing_leaves_empty_file() {
        let pal = MockPal::new();

        drop(pal.create_file(&FilePath::from("empty.txt")).unwrap());

        assert_eq!(pal.file_content(&FilePath::from("empty.txt")), Some(vec![]));
    }

    #[test]
    fn test_append_file() {
        let pal = MockPal::new();
        pal.add_file(FilePath::from("log.txt"), b"one\n".to_vec());

        pal.append_file(&FilePath::from("log.txt"))
            .unwrap()
            .write_all(b"two\n")
            .unwrap();

        assert_eq!(
            pal.read_file_to_string(&FilePath::from("log.txt")).unwrap(),
            "one\ntwo\n"
        );
    }

    #[test]
    fn test_write_to_directory_fails() {
        let pal = MockPal::new();
        pal.add_directory(FilePath::from("dir"));

        let err = pal
            .append_file(&FilePath::from("dir"))
            .err()
            .expect("appending to a directory should fail");
        assert_eq!(io_kind(&err), IoErrorKind::IsADirectory);
    }

    #[test]
    fn test_read_only() {
        let pal = MockPal::new();
        let path = FilePath::from("locked.txt");
        pal.add_file(path.clone(), b"content".to_vec());

        assert!(!pal.is_read_only(&path).unwrap());
        pal.set_read_only(path.clone(), true);
        assert!(pal.is_read_only(&path).unwrap());

        let err = pal
            .create_file(&path)
            .err()
            .expect("truncating a read-only file should fail");
        assert_eq!(io_kind(&err), IoErrorKind::PermissionDenied);
        assert_eq!(pal.file_content(&path), Some(b"content".to_vec()));

        pal.set_read_only(path.clone(), false);
        assert!(!pal.is_read_only(&path).unwrap());
    }

    #[test]
    fn test_is_read_only_missing() {
        let pal = MockPal::new();

        let err = pal.is_read_only(&FilePath::from("missing.txt")).unwrap_err();
        assert_eq!(io_kind(&err), IoErrorKind::NotFound);
    }
}
