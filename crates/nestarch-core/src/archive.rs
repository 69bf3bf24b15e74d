//! Reusable archive handle and its builder.

use std::path::Path;
use std::path::PathBuf;

use crate::EntryMeta;
use crate::ExtractedEntry;
use crate::FaultSink;
use crate::Outcome;
use crate::Result;
use crate::TraversalConfig;
use crate::TraversalError;
use crate::formats::resolve_container;
use crate::types::ScratchRoot;

/// A root archive bound to a scratch root and traversal limits.
///
/// Each call runs an independent traversal with a fresh context, so the
/// same `Archive` can be extracted or peeked any number of times.
#[derive(Debug, Clone)]
pub struct Archive {
    path: PathBuf,
    scratch_root: PathBuf,
    config: TraversalConfig,
}

impl Archive {
    /// Returns the path to the root archive.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the scratch root.
    #[must_use]
    pub fn scratch_root(&self) -> &Path {
        &self.scratch_root
    }

    /// Returns the traversal limits.
    #[must_use]
    pub fn config(&self) -> &TraversalConfig {
        &self.config
    }

    /// Extracts the entries selected by `predicate`.
    ///
    /// # Errors
    ///
    /// Returns an error if the scratch root stopped being a directory since
    /// the archive was built. Traversal faults are reported as
    /// [`Outcome::Fail`].
    pub fn extract<F>(&self, predicate: F) -> Result<Outcome<ExtractedEntry>>
    where
        F: Fn(&EntryMeta) -> bool,
    {
        crate::api::extract_archive(&self.path, &self.scratch_root, &self.config, predicate)
    }

    /// Extracts the entries selected by `predicate`, reporting decode faults
    /// to `sink`.
    ///
    /// # Errors
    ///
    /// See [`extract`](Self::extract).
    pub fn extract_with_sink<F>(
        &self,
        predicate: F,
        sink: &mut dyn FaultSink,
    ) -> Result<Outcome<ExtractedEntry>>
    where
        F: Fn(&EntryMeta) -> bool,
    {
        crate::api::extract_archive_with_sink(
            &self.path,
            &self.scratch_root,
            &self.config,
            predicate,
            sink,
        )
    }

    /// Lists entries, descending into nested archives `predicate` selects.
    ///
    /// # Errors
    ///
    /// See [`extract`](Self::extract).
    pub fn peek<F>(&self, predicate: F) -> Result<Outcome<EntryMeta>>
    where
        F: Fn(&EntryMeta) -> bool,
    {
        crate::api::peek_archive(&self.path, &self.scratch_root, &self.config, predicate)
    }

    /// Lists entries, reporting decode faults to `sink`.
    ///
    /// # Errors
    ///
    /// See [`extract`](Self::extract).
    pub fn peek_with_sink<F>(
        &self,
        predicate: F,
        sink: &mut dyn FaultSink,
    ) -> Result<Outcome<EntryMeta>>
    where
        F: Fn(&EntryMeta) -> bool,
    {
        crate::api::peek_archive_with_sink(
            &self.path,
            &self.scratch_root,
            &self.config,
            predicate,
            sink,
        )
    }
}

/// Builder for configuring archive traversal.
///
/// # Examples
///
/// ```no_run
/// use nestarch_core::ArchiveBuilder;
/// use nestarch_core::ScratchResources;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let archive = ArchiveBuilder::new()
///     .archive("outer.zip")
///     .scratch_root("/tmp/scratch")
///     .max_depth(3)
///     .iteration_ceiling(1_000)
///     .build()?;
///
/// let outcome = archive.peek(|_| true)?;
/// println!("{} entries", outcome.entries().len());
/// outcome.cleanup()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ArchiveBuilder {
    archive_path: Option<PathBuf>,
    scratch_root: Option<PathBuf>,
    config: Option<TraversalConfig>,
    max_depth: Option<usize>,
    iteration_ceiling: Option<usize>,
    buffer_size: Option<usize>,
}

impl ArchiveBuilder {
    /// Creates a new `ArchiveBuilder`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the root archive path.
    #[must_use]
    pub fn archive<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.archive_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the scratch root directory.
    #[must_use]
    pub fn scratch_root<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.scratch_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the base traversal configuration.
    ///
    /// Individual limits set on the builder take precedence.
    #[must_use]
    pub fn config(mut self, config: TraversalConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets the maximum nesting depth.
    #[must_use]
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Sets the iteration ceiling.
    #[must_use]
    pub fn iteration_ceiling(mut self, iteration_ceiling: usize) -> Self {
        self.iteration_ceiling = Some(iteration_ceiling);
        self
    }

    /// Sets the I/O buffer size.
    #[must_use]
    pub fn buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = Some(buffer_size);
        self
    }

    /// Validates the settings and builds the [`Archive`].
    ///
    /// # Errors
    ///
    /// Returns an error if the archive path or scratch root is not set, the
    /// limits are invalid, the scratch root is not an existing directory, or
    /// the archive name does not resolve to a walkable container.
    pub fn build(self) -> Result<Archive> {
        let path = self
            .archive_path
            .ok_or_else(|| TraversalError::InvalidConfig {
                reason: "archive path not set".to_string(),
            })?;

        let scratch_root = self
            .scratch_root
            .ok_or_else(|| TraversalError::InvalidConfig {
                reason: "scratch root not set".to_string(),
            })?;

        let mut config = self.config.unwrap_or_default();
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if let Some(iteration_ceiling) = self.iteration_ceiling {
            config.iteration_ceiling = iteration_ceiling;
        }
        if let Some(buffer_size) = self.buffer_size {
            config.buffer_size = buffer_size;
        }
        config.validate()?;

        let scratch_root = ScratchRoot::new(scratch_root)?.as_path().to_path_buf();

        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        resolve_container(&name)?;

        Ok(Archive {
            path,
            scratch_root,
            config,
        })
    }
}
