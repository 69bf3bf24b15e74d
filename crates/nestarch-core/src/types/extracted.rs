//! An entry materialized into scratch storage.

use std::io;
use std::path::Path;
use std::path::PathBuf;

use super::EntryMeta;

/// An entry whose bytes were written to its own scratch subdirectory.
///
/// The backing file belongs to the [`Outcome`](crate::Outcome) holding this
/// value and stays on disk until that outcome is cleaned up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedEntry {
    meta: EntryMeta,
    path: PathBuf,
    scratch_dir: PathBuf,
}

impl ExtractedEntry {
    pub(crate) fn new(meta: EntryMeta, path: PathBuf, scratch_dir: PathBuf) -> Self {
        Self {
            meta,
            path,
            scratch_dir,
        }
    }

    /// Metadata of the extracted entry.
    #[must_use]
    pub fn meta(&self) -> &EntryMeta {
        &self.meta
    }

    /// Location of the materialized bytes.
    ///
    /// For directory entries this is an empty directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The scratch subdirectory that holds [`path`](Self::path).
    #[must_use]
    pub fn scratch_dir(&self) -> &Path {
        &self.scratch_dir
    }

    /// Reads the materialized file as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns an error if the file was already cleaned up or is not valid
    /// UTF-8.
    pub fn read_to_string(&self) -> io::Result<String> {
        std::fs::read_to_string(&self.path)
    }
}
