//! Terminal traversal outcomes and scratch cleanup.

use std::io;
use std::path::PathBuf;

use tracing::debug;
use tracing::warn;

use crate::Result;
use crate::TraversalError;

/// Release of the scratch directories an outcome owns.
///
/// Cleanup is always explicit: dropping an outcome leaves its scratch
/// directories on disk.
pub trait ScratchResources {
    /// Scratch directories registered during the traversal.
    fn scratch_dirs(&self) -> &[PathBuf];

    /// Recursively deletes every registered scratch directory.
    ///
    /// Missing directories count as already released, so calling this twice
    /// is not an error.
    ///
    /// # Errors
    ///
    /// Returns the first I/O error other than "not found". Remaining
    /// directories are still attempted.
    fn cleanup(&self) -> io::Result<()> {
        let mut first_error = None;

        for dir in self.scratch_dirs() {
            match std::fs::remove_dir_all(dir) {
                Ok(()) => debug!(dir = %dir.display(), "removed scratch directory"),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }

        first_error.map_or(Ok(()), Err)
    }
}

/// A traversal that ran to completion or to a policy boundary.
#[derive(Debug)]
pub struct Success<T> {
    /// Results in discovery order.
    pub entries: Vec<T>,
    /// `false` if the iteration ceiling truncated the walk.
    pub fully_read: bool,
    scratch_dirs: Vec<PathBuf>,
}

impl<T> Success<T> {
    pub(crate) fn new(entries: Vec<T>, fully_read: bool, scratch_dirs: Vec<PathBuf>) -> Self {
        Self {
            entries,
            fully_read,
            scratch_dirs,
        }
    }
}

impl<T> ScratchResources for Success<T> {
    fn scratch_dirs(&self) -> &[PathBuf] {
        &self.scratch_dirs
    }
}

/// A traversal aborted by a fatal fault.
///
/// Partial results and scratch directories created before the fault are
/// preserved.
#[derive(Debug)]
pub struct Fail<T> {
    /// The fault that ended the traversal.
    pub error: TraversalError,
    /// Results accumulated before the fault, in discovery order.
    pub entries: Vec<T>,
    scratch_dirs: Vec<PathBuf>,
}

impl<T> Fail<T> {
    pub(crate) fn new(error: TraversalError, entries: Vec<T>, scratch_dirs: Vec<PathBuf>) -> Self {
        Self {
            error,
            entries,
            scratch_dirs,
        }
    }
}

impl<T> ScratchResources for Fail<T> {
    fn scratch_dirs(&self) -> &[PathBuf] {
        &self.scratch_dirs
    }
}

/// Result of one extract or peek traversal.
///
/// # Examples
///
/// ```no_run
/// use nestarch_core::Outcome;
/// use nestarch_core::ScratchResources;
/// use nestarch_core::TraversalConfig;
/// use nestarch_core::extract_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let outcome = extract_archive("outer.zip", "/tmp/scratch", &TraversalConfig::default(), |_| true)?;
/// match &outcome {
///     Outcome::Success(success) => println!("{} entries", success.entries.len()),
///     Outcome::Fail(fail) => eprintln!("failed: {}", fail.error),
/// }
/// outcome.cleanup()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub enum Outcome<T> {
    /// The walk finished.
    Success(Success<T>),
    /// The walk was aborted.
    Fail(Fail<T>),
}

impl<T> Outcome<T> {
    /// Returns `true` for [`Outcome::Success`].
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Results in discovery order, partial for a failed traversal.
    #[must_use]
    pub fn entries(&self) -> &[T] {
        match self {
            Self::Success(success) => &success.entries,
            Self::Fail(fail) => &fail.entries,
        }
    }

    /// Completeness flag. Always `false` for a failed traversal.
    #[must_use]
    pub const fn fully_read(&self) -> bool {
        match self {
            Self::Success(success) => success.fully_read,
            Self::Fail(_) => false,
        }
    }

    /// The fatal fault, if the traversal failed.
    #[must_use]
    pub const fn error(&self) -> Option<&TraversalError> {
        match self {
            Self::Success(_) => None,
            Self::Fail(fail) => Some(&fail.error),
        }
    }

    /// Returns the success value, or cleans up and returns the fault.
    ///
    /// A caller using this never leaks scratch directories of a failed
    /// traversal.
    ///
    /// # Errors
    ///
    /// Returns the fault carried by [`Outcome::Fail`].
    pub fn into_success(self) -> Result<Success<T>> {
        match self {
            Self::Success(success) => Ok(success),
            Self::Fail(fail) => {
                if let Err(e) = fail.cleanup() {
                    warn!(error = %e, "failed to clean up scratch directories");
                }
                Err(fail.error)
            }
        }
    }
}

impl<T> ScratchResources for Outcome<T> {
    fn scratch_dirs(&self) -> &[PathBuf] {
        match self {
            Self::Success(success) => success.scratch_dirs(),
            Self::Fail(fail) => fail.scratch_dirs(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn scratch(temp: &TempDir, name: &str) -> PathBuf {
        let dir = temp.path().join(name);
        std::fs::create_dir(&dir).unwrap();
        std::fs::write(dir.join("file.txt"), b"data").unwrap();
        dir
    }

    #[test]
    fn test_success_cleanup_idempotent() {
        let temp = TempDir::new().unwrap();
        let dirs = vec![scratch(&temp, "extract_0"), scratch(&temp, "extract_1")];
        let outcome: Outcome<u32> = Outcome::Success(Success::new(vec![1, 2], true, dirs.clone()));

        assert!(dirs.iter().all(|d| d.exists()));
        outcome.cleanup().unwrap();
        assert!(dirs.iter().all(|d| !d.exists()));
        outcome.cleanup().unwrap();
    }

    #[test]
    fn test_cleanup_tolerates_missing() {
        let temp = TempDir::new().unwrap();
        let gone = temp.path().join("extract_9");
        let fail: Fail<u32> = Fail::new(
            TraversalError::Io(io::Error::other("boom")),
            Vec::new(),
            vec![gone],
        );
        fail.cleanup().unwrap();
    }

    #[test]
    fn test_accessors() {
        let success: Outcome<u32> = Outcome::Success(Success::new(vec![7], false, Vec::new()));
        assert!(success.is_success());
        assert_eq!(success.entries(), &[7]);
        assert!(!success.fully_read());
        assert!(success.error().is_none());

        let fail: Outcome<u32> = Outcome::Fail(Fail::new(
            TraversalError::UnsupportedContainer {
                name: "a.txt".into(),
            },
            vec![3],
            Vec::new(),
        ));
        assert!(!fail.is_success());
        assert_eq!(fail.entries(), &[3]);
        assert!(!fail.fully_read());
        assert!(fail.error().is_some());
    }

    #[test]
    fn test_into_success_cleans_up_fail() {
        let temp = TempDir::new().unwrap();
        let dir = scratch(&temp, "extract_0");
        let outcome: Outcome<u32> = Outcome::Fail(Fail::new(
            TraversalError::Io(io::Error::other("disk full")),
            vec![1],
            vec![dir.clone()],
        ));

        let err = outcome.into_success().unwrap_err();
        assert!(matches!(err, TraversalError::Io(_)));
        assert!(!dir.exists());
    }

    #[test]
    fn test_into_success_keeps_success_dirs() {
        let temp = TempDir::new().unwrap();
        let dir = scratch(&temp, "extract_0");
        let outcome: Outcome<u32> = Outcome::Success(Success::new(vec![1], true, vec![dir.clone()]));

        let success = outcome.into_success().unwrap();
        assert!(dir.exists());
        assert_eq!(success.scratch_dirs(), &[dir]);
        success.cleanup().unwrap();
    }
}
