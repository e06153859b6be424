//! Filesystem access used for saving, loading, and locating version files.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

/// Minimal filesystem interface.
pub trait Filesystem {
    /// Reads the whole contents of a file, or returns `None` if the file does
    /// not exist.
    fn read(&self, path: &Path) -> io::Result<Option<String>>;
    /// Writes a file, replacing any existing contents.
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
    /// Returns whether a file exists at `path`.
    fn exists(&self, path: &Path) -> bool;
    /// Returns the parent of a directory, or `None` at the root.
    fn parent(&self, dir: &Path) -> Option<PathBuf> {
        dir.parent().map(Path::to_path_buf)
    }
}

impl<F: Filesystem + ?Sized> Filesystem for &F {
    fn read(&self, path: &Path) -> io::Result<Option<String>> {
        (**self).read(path)
    }
    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        (**self).write(path, contents)
    }
    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }
    fn parent(&self, dir: &Path) -> Option<PathBuf> {
        (**self).parent(dir)
    }
}

/// Filesystem backed by [`std::fs`].
#[derive(Debug, Default, Copy, Clone)]
pub struct StdFs;

impl Filesystem for StdFs {
    fn read(&self, path: &Path) -> io::Result<Option<String>> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        std::fs::write(path, contents)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// In-memory filesystem containing only files. Every directory implicitly
/// exists.
#[derive(Debug, Default)]
pub struct MemoryFs {
    files: Mutex<BTreeMap<PathBuf, String>>,
}

impl MemoryFs {
    /// Constructs an empty filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file, replacing any existing one.
    pub fn insert(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files.lock().insert(path.into(), contents.into());
    }

    /// Returns the contents of a file.
    pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.lock().get(path.as_ref()).cloned()
    }

    /// Removes a file and returns its contents.
    pub fn remove(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.lock().remove(path.as_ref())
    }
}

impl Filesystem for MemoryFs {
    fn read(&self, path: &Path) -> io::Result<Option<String>> {
        Ok(self.get(path))
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        self.insert(path, contents);
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().contains_key(path)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_std_fs_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope");
        assert!(!StdFs.exists(&path));
        assert_eq!(StdFs.read(&path).unwrap(), None);
    }

    #[test]
    fn test_std_fs_directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!StdFs.exists(dir.path()));
    }

    #[test]
    fn test_memory_fs() {
        let fs = MemoryFs::new();
        let path = Path::new("/a/b/.semver");
        assert!(!fs.exists(path));
        fs.write(path, "v1.2.3").unwrap();
        assert!(fs.exists(path));
        assert_eq!(fs.read(path).unwrap().as_deref(), Some("v1.2.3"));
        assert_eq!(fs.parent(Path::new("/a/b")), Some(PathBuf::from("/a")));
        assert_eq!(fs.parent(Path::new("/")), None);
        assert_eq!(fs.remove(path).as_deref(), Some("v1.2.3"));
        assert_eq!(fs.read(path).unwrap(), None);
    }
}
