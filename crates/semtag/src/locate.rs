use std::path::{Path, PathBuf};

use crate::{FILE_NAME, Filesystem, PersistError, SemanticVersion, StdFs};

/// Version file found by [`VersionFileLocator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    /// Path to the version file.
    pub path: PathBuf,
    /// Version loaded from the file.
    pub version: SemanticVersion,
}

/// Searches a directory and each of its ancestors for a version file.
#[derive(Debug, Clone)]
pub struct VersionFileLocator<F = StdFs> {
    fs: F,
    file_name: String,
}

impl Default for VersionFileLocator {
    fn default() -> Self {
        Self::new(StdFs)
    }
}

impl<F: Filesystem> VersionFileLocator<F> {
    /// Constructs a locator that searches for [`FILE_NAME`].
    pub fn new(fs: F) -> Self {
        Self {
            fs,
            file_name: FILE_NAME.to_owned(),
        }
    }

    /// Sets the file name to search for.
    #[must_use]
    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = file_name.into();
        self
    }

    /// Returns the file name searched for.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the filesystem.
    pub fn fs(&self) -> &F {
        &self.fs
    }

    /// Returns the path of the version file in `start_dir` or its nearest
    /// ancestor that has one, without loading it.
    pub fn locate(&self, start_dir: &Path) -> Option<PathBuf> {
        let mut dir = Some(start_dir.to_path_buf());
        while let Some(d) = dir {
            let candidate = d.join(&self.file_name);
            log::trace!("looking for version file at {candidate:?}");
            if self.fs.exists(&candidate) {
                return Some(candidate);
            }
            dir = self.fs.parent(&d);
        }
        None
    }

    /// Loads the version file in `start_dir` or its nearest ancestor that has
    /// one.
    ///
    /// Returns `Ok(None)` if there is no such file. Returns an error if the
    /// file exists but cannot be read or parsed.
    pub fn find_file(&self, start_dir: &Path) -> Result<Option<Located>, PersistError> {
        let Some(path) = self.locate(start_dir) else {
            log::debug!("no {:?} in {start_dir:?} or its ancestors", self.file_name);
            return Ok(None);
        };
        log::debug!("found version file {path:?}");
        let version = SemanticVersion::load_with(&self.fs, &path)?;
        Ok(Some(Located { path, version }))
    }

    /// Same as [`VersionFileLocator::find_file()`], but returns only the
    /// version.
    pub fn find(&self, start_dir: &Path) -> Result<Option<SemanticVersion>, PersistError> {
        Ok(self.find_file(start_dir)?.map(|located| located.version))
    }
}

impl SemanticVersion {
    /// Loads the nearest [`FILE_NAME`] in the current working directory or one
    /// of its ancestors.
    ///
    /// Returns `Ok(None)` if there is no such file.
    pub fn find() -> Result<Option<Self>, PersistError> {
        Self::find_from(&std::env::current_dir()?)
    }

    /// Loads the nearest [`FILE_NAME`] in `start_dir` or one of its ancestors.
    ///
    /// Relative paths are resolved against the current working directory.
    ///
    /// Returns `Ok(None)` if there is no such file.
    pub fn find_from(start_dir: impl AsRef<Path>) -> Result<Option<Self>, PersistError> {
        let start_dir = std::path::absolute(start_dir)?;
        VersionFileLocator::new(StdFs).find(&start_dir)
    }
}
