//! Extract mode: selected entries are materialized into scratch storage.

use tracing::debug;

use super::ContainerInput;
use super::TraversalContext;
use super::TraversalMode;
use super::walk_archive;
use crate::EntryMeta;
use crate::ExtractedEntry;
use crate::Result;
use crate::formats::ContainerKind;
use crate::formats::SourceEntry;

impl TraversalMode for ExtractedEntry {
    fn visit_entry(
        ctx: &mut TraversalContext<'_, Self>,
        entry: SourceEntry<'_>,
        meta: EntryMeta,
        nested: Option<ContainerKind>,
        depth: usize,
    ) -> Result<()> {
        let mut reader = entry.reader;
        let descend = nested.is_some() && depth < ctx.config().max_depth;

        if !ctx.select(&meta) {
            if descend {
                debug!(container = meta.full_path(), depth = depth + 1, "descending from stream");
                walk_archive(
                    ctx,
                    ContainerInput::Stream(&mut *reader),
                    meta.file_name(),
                    meta.full_path(),
                    depth + 1,
                )?;
            }
            return Ok(());
        }

        let (path, scratch_dir) = ctx.materialize(&mut *reader, &meta)?;
        drop(reader);
        ctx.record(ExtractedEntry::new(meta.clone(), path.clone(), scratch_dir));

        if descend {
            debug!(container = meta.full_path(), depth = depth + 1, "descending from scratch copy");
            let mut nested_reader = ctx.open_scratch(&path)?;
            walk_archive(
                ctx,
                ContainerInput::Seekable(&mut nested_reader),
                meta.file_name(),
                meta.full_path(),
                depth + 1,
            )?;
        }
        Ok(())
    }
}
