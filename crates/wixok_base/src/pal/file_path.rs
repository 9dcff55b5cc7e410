use relative_path::{RelativePath, RelativePathBuf};
use std::path::{Path, PathBuf};

/// Path of a file as seen by a PAL.
///
/// `RealPal` resolves it against its base directory; `MockPal` uses it as a
/// storage key. Strings, `Path`s and relative paths of the same text convert to
/// equal `FilePath`s. A `Path` that is not valid UTF-8 keeps its native form for
/// filesystem access and is only displayed lossily.
///
/// # Examples
///
/// ```
/// use wixok_base::FilePath;
/// use std::path::Path;
///
/// assert_eq!(FilePath::from("notes/todo.txt"), FilePath::from(Path::new("notes/todo.txt")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FilePath {
    relative: RelativePathBuf,
    /// Set only when the path was given as a non-UTF-8 `Path`.
    native: Option<PathBuf>,
}

impl FilePath {
    fn from_relative(relative: RelativePathBuf) -> Self {
        Self {
            relative,
            native: None,
        }
    }

    /// Returns the underlying RelativePath.
    ///
    /// For a non-UTF-8 path this is the lossy rendering used for display.
    pub fn as_relative(&self) -> &RelativePath {
        &self.relative
    }

    /// Converts to a regular Path for use with std::fs operations.
    pub fn as_path(&self) -> &Path {
        match &self.native {
            Some(native) => native.as_path(),
            None => Path::new(self.relative.as_str()),
        }
    }
}

impl From<&str> for FilePath {
    fn from(s: &str) -> Self {
        Self::from_relative(RelativePathBuf::from(s))
    }
}

impl From<String> for FilePath {
    fn from(s: String) -> Self {
        Self::from_relative(RelativePathBuf::from(s))
    }
}

impl From<RelativePathBuf> for FilePath {
    fn from(p: RelativePathBuf) -> Self {
        Self::from_relative(p)
    }
}

impl From<&RelativePath> for FilePath {
    fn from(p: &RelativePath) -> Self {
        Self::from_relative(p.to_relative_path_buf())
    }
}

impl From<&Path> for FilePath {
    fn from(p: &Path) -> Self {
        match p.to_str() {
            Some(s) => Self::from(s),
            None => Self {
                relative: RelativePathBuf::from(p.to_string_lossy().into_owned()),
                native: Some(p.to_path_buf()),
            },
        }
    }
}

impl From<PathBuf> for FilePath {
    fn from(p: PathBuf) -> Self {
        Self::from(p.as_path())
    }
}

impl From<&PathBuf> for FilePath {
    fn from(p: &PathBuf) -> Self {
        Self::from(p.as_path())
    }
}

impl From<&FilePath> for FilePath {
    fn from(p: &FilePath) -> Self {
        p.clone()
    }
}

impl std::fmt::Display for FilePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.relative)
    }
}

impl AsRef<RelativePath> for FilePath {
    fn as_ref(&self) -> &RelativePath {
        &self.relative
    }
}

impl AsRef<Path> for FilePath {
    fn as_ref(&self) -> &Path {
        self.as_path()
    }
}
