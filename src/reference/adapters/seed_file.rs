//! Loading reference seed documents from the filesystem.
//!
//! Files are opened through a `cap-std` directory handle so the loader can
//! only reach the directory that contains the requested file.

use crate::reference::domain::ReferenceSeed;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use thiserror::Error;

/// Errors raised while reading a seed file.
#[derive(Debug, Error)]
pub enum SeedFileError {
    /// The path does not name a file.
    #[error("seed path '{0}' does not name a file")]
    InvalidPath(Utf8PathBuf),

    /// The file could not be read.
    #[error("failed to read seed file '{path}': {source}")]
    Io {
        /// Path that was being read.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid seed document.
    #[error("invalid seed document '{path}': {source}")]
    Parse {
        /// Path that was being parsed.
        path: Utf8PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Reads and parses a JSON reference seed from `path`.
///
/// # Errors
///
/// Returns [`SeedFileError`] when the path has no file name, the file cannot
/// be read, or its content is not a valid [`ReferenceSeed`].
pub fn load_seed(path: &Utf8Path) -> Result<ReferenceSeed, SeedFileError> {
    let text = read_utf8_file(path)?;
    ReferenceSeed::from_json_str(&text).map_err(|source| SeedFileError::Parse {
        path: path.to_owned(),
        source,
    })
}

/// Reads a UTF-8 file through a capability handle on its parent directory.
///
/// # Errors
///
/// Returns [`SeedFileError::InvalidPath`] when the path has no file name and
/// [`SeedFileError::Io`] when opening or reading fails.
pub fn read_utf8_file(path: &Utf8Path) -> Result<String, SeedFileError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| SeedFileError::InvalidPath(path.to_owned()))?;
    let parent = path
        .parent()
        .filter(|dir| !dir.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let io_error = |source| SeedFileError::Io {
        path: path.to_owned(),
        source,
    };
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(io_error)?;
    dir.read_to_string(file_name).map_err(io_error)
}

impl ReferenceSeed {
    /// Reads a JSON seed document from `path`.
    ///
    /// # Errors
    ///
    /// See [`load_seed`].
    pub fn load(path: &Utf8Path) -> Result<Self, SeedFileError> {
        load_seed(path)
    }
}
