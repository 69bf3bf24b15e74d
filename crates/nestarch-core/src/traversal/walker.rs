//! The per-entry loop shared by both traversal modes.

use std::ops::ControlFlow;

use tracing::trace;

use super::TraversalContext;
use super::TraversalMode;
use crate::EntryMeta;
use crate::Result;
use crate::formats::ContainerKind;
use crate::formats::EntrySource;
use crate::formats::SourceEntry;

/// Drives `source` until it is exhausted or the iteration ceiling trips.
pub(crate) fn walk_entries<S, M>(
    ctx: &mut TraversalContext<'_, M>,
    source: &mut S,
    parent_name: &str,
    parent_path: &str,
    depth: usize,
) -> Result<()>
where
    S: EntrySource,
    M: TraversalMode,
{
    while let Some(flow) = source.next_entry(ctx, |ctx, entry| {
        visit_one(ctx, entry, parent_name, parent_path, depth)
    })? {
        if flow.is_break() {
            break;
        }
    }
    Ok(())
}

fn visit_one<M: TraversalMode>(
    ctx: &mut TraversalContext<'_, M>,
    entry: SourceEntry<'_>,
    parent_name: &str,
    parent_path: &str,
    depth: usize,
) -> Result<ControlFlow<()>> {
    if ctx.should_stop() {
        return Ok(ControlFlow::Break(()));
    }

    let meta = EntryMeta::new(
        ctx.claim_index(),
        &entry.name,
        parent_name,
        parent_path,
        entry.size,
        entry.compressed_size,
        entry.is_dir,
    );
    let nested = if entry.is_dir {
        None
    } else {
        ContainerKind::from_name(meta.file_name())
    };

    trace!(
        index = meta.index(),
        entry = meta.full_path(),
        size = meta.size(),
        depth,
        "discovered entry"
    );

    M::visit_entry(ctx, entry, meta, nested, depth)?;
    Ok(ControlFlow::Continue(()))
}
