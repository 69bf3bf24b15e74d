//! Peek mode: metadata for every discovered entry, no results on disk.

use tracing::debug;

use super::ContainerInput;
use super::TraversalContext;
use super::TraversalMode;
use super::walk_archive;
use crate::EntryMeta;
use crate::Result;
use crate::formats::ContainerKind;
use crate::formats::SourceEntry;

impl TraversalMode for EntryMeta {
    fn visit_entry(
        ctx: &mut TraversalContext<'_, Self>,
        entry: SourceEntry<'_>,
        meta: EntryMeta,
        nested: Option<ContainerKind>,
        depth: usize,
    ) -> Result<()> {
        // Descent is gated by the predicate; recording is not.
        let descend = ctx.select(&meta) && nested.is_some() && depth < ctx.config().max_depth;
        ctx.record(meta.clone());

        if !descend {
            return Ok(());
        }

        let mut reader = entry.reader;
        let (path, _) = ctx.materialize(&mut *reader, &meta)?;
        drop(reader);

        debug!(container = meta.full_path(), depth = depth + 1, "descending from scratch copy");
        let mut nested_reader = ctx.open_scratch(&path)?;
        walk_archive(
            ctx,
            ContainerInput::Seekable(&mut nested_reader),
            meta.file_name(),
            meta.full_path(),
            depth + 1,
        )
    }
}
