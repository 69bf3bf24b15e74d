//! Validated scratch root directory.

use std::path::Path;
use std::path::PathBuf;

use crate::Result;
use crate::TraversalError;

/// The caller-designated directory that receives per-entry scratch
/// subdirectories.
///
/// Once constructed, the root is known to exist, to be a directory, and is
/// held as an absolute canonical path. Constructing it is the configuration
/// check that runs before a traversal begins.
///
/// # Examples
///
/// ```no_run
/// use nestarch_core::types::ScratchRoot;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let root = ScratchRoot::new("/tmp/scratch")?;
/// println!("Materializing under: {}", root.as_path().display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScratchRoot(PathBuf);

impl ScratchRoot {
    /// Validates `path` as a scratch root.
    ///
    /// The directory is never created here: it must already exist.
    ///
    /// # Errors
    ///
    /// Returns [`TraversalError::InvalidScratchRoot`] if the path does not
    /// exist, is not a directory, or cannot be canonicalized.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.exists() {
            return Err(TraversalError::InvalidScratchRoot {
                path,
                reason: "directory does not exist".to_string(),
            });
        }

        if !path.is_dir() {
            return Err(TraversalError::InvalidScratchRoot {
                path,
                reason: "path is not a directory".to_string(),
            });
        }

        let canonical = path
            .canonicalize()
            .map_err(|e| TraversalError::InvalidScratchRoot {
                path: path.clone(),
                reason: format!("failed to canonicalize: {e}"),
            })?;

        Ok(Self(canonical))
    }

    /// Returns the canonical path of the scratch root.
    #[must_use]
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Joins a scratch subdirectory name onto the root.
    #[must_use]
    pub fn join(&self, name: &str) -> PathBuf {
        self.0.join(name)
    }
}

impl AsRef<Path> for ScratchRoot {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_scratch_root_valid() {
        let temp = TempDir::new().unwrap();
        let root = ScratchRoot::new(temp.path()).unwrap();
        assert!(root.as_path().is_absolute());
        assert!(root.as_path().is_dir());
    }

    #[test]
    fn test_scratch_root_missing() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");
        let result = ScratchRoot::new(&missing);
        assert!(matches!(
            result,
            Err(TraversalError::InvalidScratchRoot { .. })
        ));
        assert!(!missing.exists(), "scratch root must not be created");
    }

    #[test]
    fn test_scratch_root_is_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();
        let err = ScratchRoot::new(&file).unwrap_err();
        assert!(err.is_configuration_fault());
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn test_scratch_root_join() {
        let temp = TempDir::new().unwrap();
        let root = ScratchRoot::new(temp.path()).unwrap();
        let joined = root.join("extract_0");
        assert!(joined.starts_with(root.as_path()));
        assert!(joined.ends_with("extract_0"));
    }
}
