//! Container dispatch: the recursion entry point.

use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;

use tracing::debug;
use tracing::trace;
use zip::ZipArchive;

use super::TraversalContext;
use super::TraversalMode;
use super::walker::walk_entries;
use crate::Result;
use crate::TraversalError;
use crate::formats::ContainerKind;
use crate::formats::ReadSeek;
use crate::formats::ZipArchiveSource;
use crate::formats::ZipEntrySource;

/// Bytes of one container, as handed to the dispatcher.
pub(crate) enum ContainerInput<'r> {
    /// A file on disk: the root archive or a materialized scratch copy.
    Seekable(&'r mut dyn ReadSeek),
    /// The live content stream of an entry in the enclosing container.
    Stream(&'r mut dyn Read),
}

/// Walks the container `name`.
///
/// `parent_path` is the full path of the container itself (empty for the
/// root) and `depth` the depth its entries live at. Nothing is read once
/// the iteration ceiling is reached or when the container lies beyond the
/// configured depth.
pub(crate) fn walk_archive<M: TraversalMode>(
    ctx: &mut TraversalContext<'_, M>,
    input: ContainerInput<'_>,
    name: &str,
    parent_path: &str,
    depth: usize,
) -> Result<()> {
    if ctx.should_stop() {
        trace!(container = name, depth, "iteration ceiling reached, not descending");
        return Ok(());
    }
    if depth > ctx.config().max_depth {
        trace!(container = name, depth, "depth limit reached, not descending");
        return Ok(());
    }

    match ContainerKind::from_name(name) {
        Some(ContainerKind::Zip) => {
            debug!(container = name, path = parent_path, depth, "walking container");
            match input {
                ContainerInput::Seekable(reader) => {
                    walk_zip_file(ctx, reader, name, parent_path, depth)
                }
                ContainerInput::Stream(reader) => {
                    let mut source = ZipEntrySource::new(reader, name);
                    walk_entries(ctx, &mut source, name, parent_path, depth)
                }
            }
        }
        Some(kind) => Err(TraversalError::UnimplementedContainer {
            name: name.to_string(),
            kind,
        }),
        None => Err(TraversalError::UnsupportedContainer {
            name: name.to_string(),
        }),
    }
}

/// Walks a seekable ZIP through its central directory.
///
/// Without a readable central directory (truncated or corrupt files) the
/// local headers are decoded front to back instead.
fn walk_zip_file<M: TraversalMode>(
    ctx: &mut TraversalContext<'_, M>,
    mut reader: &mut dyn ReadSeek,
    name: &str,
    parent_path: &str,
    depth: usize,
) -> Result<()> {
    match ZipArchive::new(&mut *reader) {
        Ok(archive) => {
            let mut source = ZipArchiveSource::new(archive, name);
            walk_entries(ctx, &mut source, name, parent_path, depth)
        }
        Err(err) => {
            debug!(container = name, error = %err, "no central directory, reading local headers");
            reader.seek(SeekFrom::Start(0))?;
            let mut source = ZipEntrySource::new(&mut reader, name);
            walk_entries(ctx, &mut source, name, parent_path, depth)
        }
    }
}
