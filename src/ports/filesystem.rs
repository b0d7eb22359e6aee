//! Filesystem port for the read-only discovery work and output-root setup.

use std::ffi::OsString;
use std::path::Path;

/// Provides the filesystem access the planner needs.
///
/// The planner only reads the roster, lists directories and makes sure the
/// output root exists. Nothing here moves or renames files.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as a UTF-8 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or is not valid UTF-8.
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>>;

    /// Returns `true` if the path exists on the filesystem.
    fn exists(&self, path: &Path) -> bool;

    /// Returns `true` if the path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Lists the entry names of a directory, sorted by name.
    ///
    /// Names are returned as the OS reports them, including names that are
    /// not valid UTF-8.
    ///
    /// # Errors
    ///
    /// Returns an error if the path is not a directory or cannot be read.
    fn list_dir(
        &self,
        path: &Path,
    ) -> Result<Vec<OsString>, Box<dyn std::error::Error + Send + Sync>>;

    /// Creates a directory and any missing parents. Succeeds if it already exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    fn create_dir_all(&self, path: &Path) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}
