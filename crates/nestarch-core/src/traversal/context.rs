//! Mutable state threaded through one recursive walk.

use std::fs::File;
use std::io;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::DecodeFault;
use crate::EntryMeta;
use crate::FaultSink;
use crate::Result;
use crate::TraversalConfig;
use crate::copy::CopyBuffer;
use crate::copy::copy_with_buffer;
use crate::outcome::Fail;
use crate::outcome::Outcome;
use crate::outcome::Success;
use crate::types::ScratchRoot;

/// Per-invocation traversal state.
///
/// The buffer element type `M` selects the mode: `ExtractedEntry` for
/// extraction, `EntryMeta` for peeking. One context exists per top-level
/// call and is consumed by [`into_outcome`](Self::into_outcome).
pub(crate) struct TraversalContext<'a, M> {
    predicate: &'a dyn Fn(&EntryMeta) -> bool,
    sink: &'a mut dyn FaultSink,
    config: &'a TraversalConfig,
    scratch_root: &'a ScratchRoot,
    buffer: Vec<M>,
    iteration: usize,
    fully_read: bool,
    next_scratch_id: usize,
    scratch_dirs: Vec<PathBuf>,
    copy_buffer: CopyBuffer,
}

impl<'a, M> TraversalContext<'a, M> {
    pub(crate) fn new(
        config: &'a TraversalConfig,
        scratch_root: &'a ScratchRoot,
        predicate: &'a dyn Fn(&EntryMeta) -> bool,
        sink: &'a mut dyn FaultSink,
    ) -> Self {
        Self {
            predicate,
            sink,
            config,
            scratch_root,
            buffer: Vec::new(),
            iteration: 0,
            fully_read: true,
            next_scratch_id: 0,
            scratch_dirs: Vec::new(),
            copy_buffer: CopyBuffer::with_size(config.buffer_size),
        }
    }

    pub(crate) fn config(&self) -> &TraversalConfig {
        self.config
    }

    /// Returns `true` once the iteration ceiling is reached.
    ///
    /// The first `true` permanently marks the traversal as incomplete.
    pub(crate) fn should_stop(&mut self) -> bool {
        if self.iteration < self.config.iteration_ceiling {
            return false;
        }
        if self.fully_read {
            debug!(
                ceiling = self.config.iteration_ceiling,
                "iteration ceiling reached, truncating traversal"
            );
        }
        self.fully_read = false;
        true
    }

    /// Assigns the next global entry index.
    pub(crate) fn claim_index(&mut self) -> usize {
        let index = self.iteration;
        self.iteration += 1;
        index
    }

    pub(crate) fn select(&self, meta: &EntryMeta) -> bool {
        (self.predicate)(meta)
    }

    pub(crate) fn record(&mut self, item: M) {
        self.buffer.push(item);
    }

    /// Creates and registers a fresh `extract_<n>` directory under the
    /// scratch root.
    pub(crate) fn next_scratch_dir(&mut self) -> Result<PathBuf> {
        loop {
            let path = self
                .scratch_root
                .join(&format!("extract_{}", self.next_scratch_id));
            self.next_scratch_id += 1;

            match std::fs::create_dir(&path) {
                Ok(()) => {
                    self.scratch_dirs.push(path.clone());
                    return Ok(path);
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {}
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Writes the entry into its own scratch directory.
    ///
    /// Returns the materialized path and the owning scratch directory.
    /// Directory entries become an empty directory.
    pub(crate) fn materialize(
        &mut self,
        reader: &mut dyn Read,
        meta: &EntryMeta,
    ) -> Result<(PathBuf, PathBuf)> {
        let dir = self.next_scratch_dir()?;
        let path = dir.join(scratch_file_name(meta));

        if meta.is_dir() {
            std::fs::create_dir(&path)?;
            debug!(entry = meta.full_path(), path = %path.display(), "materialized directory");
            return Ok((path, dir));
        }

        let file = File::create(&path)?;
        let mut writer = BufWriter::with_capacity(self.config.buffer_size, file);
        let written = copy_with_buffer(reader, &mut writer, &mut self.copy_buffer)?;
        writer.flush()?;

        debug!(
            entry = meta.full_path(),
            path = %path.display(),
            bytes = written,
            "materialized entry"
        );
        Ok((path, dir))
    }

    /// Reopens a materialized file for nested decoding.
    pub(crate) fn open_scratch(&self, path: &Path) -> Result<BufReader<File>> {
        let file = File::open(path)?;
        Ok(BufReader::with_capacity(self.config.buffer_size, file))
    }

    /// Packages the buffer and scratch registry into a terminal outcome.
    pub(crate) fn into_outcome(self, result: Result<()>) -> Outcome<M> {
        match result {
            Ok(()) => {
                info!(
                    entries = self.buffer.len(),
                    discovered = self.iteration,
                    fully_read = self.fully_read,
                    scratch_dirs = self.scratch_dirs.len(),
                    "traversal finished"
                );
                Outcome::Success(Success::new(self.buffer, self.fully_read, self.scratch_dirs))
            }
            Err(error) => {
                warn!(
                    %error,
                    entries = self.buffer.len(),
                    scratch_dirs = self.scratch_dirs.len(),
                    "traversal failed"
                );
                Outcome::Fail(Fail::new(error, self.buffer, self.scratch_dirs))
            }
        }
    }
}

impl<M> FaultSink for TraversalContext<'_, M> {
    fn on_decode_fault(&mut self, fault: &DecodeFault) {
        warn!(
            container = %fault.container,
            attempt = fault.attempt,
            reason = %fault.reason,
            "entry decode fault"
        );
        self.sink.on_decode_fault(fault);
    }
}

/// Name of the materialized file for `meta`.
///
/// Names that would resolve outside the scratch directory fall back to
/// `entry_<index>`.
fn scratch_file_name(meta: &EntryMeta) -> String {
    match meta.file_name() {
        "" | "." | ".." => format!("entry_{}", meta.index()),
        name if name.contains('\\') => format!("entry_{}", meta.index()),
        name => name.to_string(),
    }
}
