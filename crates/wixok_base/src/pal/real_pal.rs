use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use crate::{WixokError, WixokResult};

use super::FilePath;
use super::traits::Pal;

/// Concrete PAL implementation using the real filesystem via std::fs.
///
/// All file paths are resolved relative to a configured base directory.
#[derive(Debug)]
pub struct RealPal {
    base_dir: PathBuf,
}

impl RealPal {
    /// Create a new RealPal with the given base directory.
    ///
    /// # Arguments
    /// * `base_dir` - All paths will be resolved relative to this directory
    pub fn new(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Resolve a FilePath to a filesystem path.
    fn resolve_path(&self, path: &FilePath) -> PathBuf {
        self.base_dir.join(path.as_path())
    }
}

/// Asks the OS whether the calling user may write to `path`.
///
/// Ownership, group membership and root privileges all count, the same as for
/// an `open` with write access.
#[cfg(unix)]
fn is_writable(path: &Path) -> io::Result<bool> {
    use nix::errno::Errno;
    use nix::unistd::{AccessFlags, access};

    match access(path, AccessFlags::W_OK) {
        Ok(()) => Ok(true),
        Err(Errno::EACCES | Errno::EPERM | Errno::EROFS) => Ok(false),
        Err(errno) => Err(io::Error::from(errno)),
    }
}

#[cfg(not(unix))]
fn is_writable(path: &Path) -> io::Result<bool> {
    Ok(!fs::metadata(path)?.permissions().readonly())
}

impl Pal for RealPal {
    #[instrument(skip(self), fields(path = %path))]
    fn file_exists(&self, path: &FilePath) -> WixokResult<bool> {
        let resolved = self.resolve_path(path);
        let exists = resolved.exists();
        debug!(exists, resolved = %resolved.display(), "checked file existence");
        Ok(exists)
    }

    #[instrument(skip(self), fields(path = %path))]
    fn is_read_only(&self, path: &FilePath) -> WixokResult<bool> {
        let resolved = self.resolve_path(path);
        let writable = is_writable(&resolved).map_err(|e| {
            debug!(error = %e, "failed to check write access");
            Box::new(WixokError::file_error(resolved.clone(), e))
        })?;
        let read_only = !writable;
        debug!(read_only, resolved = %resolved.display(), "checked write permission");
        Ok(read_only)
    }

    #[instrument(skip(self), fields(path = %path))]
    fn read_file(&self, path: &FilePath) -> WixokResult<Box<dyn Read + 'static>> {
        let resolved = self.resolve_path(path);
        debug!(resolved = %resolved.display(), "opening file for reading");
        let file = fs::File::open(&resolved).map_err(|e| {
            debug!(error = %e, "failed to open file");
            Box::new(WixokError::file_error(resolved, e))
        })?;
        debug!("file opened successfully");
        Ok(Box::new(file))
    }

    #[instrument(skip(self), fields(path = %path))]
    fn create_file(&self, path: &FilePath) -> WixokResult<Box<dyn Write>> {
        let resolved = self.resolve_path(path);
        debug!(resolved = %resolved.display(), "creating file");
        let file = fs::File::create(&resolved).map_err(|e| {
            debug!(error = %e, "failed to create file");
            Box::new(WixokError::file_error(resolved, e))
        })?;
        debug!("file created successfully");
        Ok(Box::new(file))
    }

    #[instrument(skip(self), fields(path = %path))]
    fn append_file(&self, path: &FilePath) -> WixokResult<Box<dyn Write>> {
        let resolved = self.resolve_path(path);
        debug!(resolved = %resolved.display(), "opening file for appending");
        let file = fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(&resolved)
            .map_err(|e| {
                debug!(error = %e, "failed to open file for appending");
                Box::new(WixokError::file_error(resolved, e))
            })?;
        debug!("file opened for appending");
        Ok(Box::new(file))
    }
}
