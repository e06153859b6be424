use std::path::Path;

use crate::{Filesystem, PersistError, SemanticVersion, StdFs, VersionTemplate};

impl SemanticVersion {
    /// Saves the version to a file, formatted using [`crate::TAG_FORMAT`] and
    /// overwriting any existing contents.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        self.save_with(&StdFs, path)
    }

    /// Loads a version from a file formatted using [`crate::TAG_FORMAT`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PersistError> {
        Self::load_with(&StdFs, path)
    }

    /// Same as [`SemanticVersion::save()`], but using an arbitrary filesystem.
    pub fn save_with(
        &self,
        fs: &impl Filesystem,
        path: impl AsRef<Path>,
    ) -> Result<(), PersistError> {
        let path = path.as_ref();
        fs.write(path, &VersionTemplate::tag().format(self))?;
        log::debug!("saved version {self} to {path:?}");
        Ok(())
    }

    /// Same as [`SemanticVersion::load()`], but using an arbitrary filesystem.
    ///
    /// A single trailing line ending is ignored.
    pub fn load_with(fs: &impl Filesystem, path: impl AsRef<Path>) -> Result<Self, PersistError> {
        let path = path.as_ref();
        let contents = fs
            .read(path)?
            .ok_or_else(|| PersistError::NotFound(path.to_owned()))?;
        let line = contents
            .strip_suffix('\n')
            .map(|s| s.strip_suffix('\r').unwrap_or(s))
            .unwrap_or(&contents);
        let version = VersionTemplate::tag()
            .parse(line, false)
            .map_err(|source| PersistError::Parse {
                path: path.to_owned(),
                source,
            })?;
        log::debug!("loaded version {version} from {path:?}");
        Ok(version)
    }
}
