//! The depth-bounded, ceiling-bounded recursive walk.
//!
//! [`dispatch::walk_archive`] is the single re-entry point: it resolves a
//! container, drives its entry source through [`walker::walk_entries`], and
//! each entry is handed to the [`TraversalMode`] of the buffer element type.

pub(crate) mod context;
pub(crate) mod dispatch;
mod extract;
mod peek;
pub(crate) mod walker;

pub(crate) use context::TraversalContext;
pub(crate) use dispatch::ContainerInput;
pub(crate) use dispatch::walk_archive;

use crate::EntryMeta;
use crate::Result;
use crate::formats::ContainerKind;
use crate::formats::SourceEntry;

/// Per-entry behavior of a traversal, selected by the buffer element type.
pub(crate) trait TraversalMode: Sized {
    /// Handles one discovered entry.
    ///
    /// `nested` is the entry's own container kind, `None` for plain files
    /// and directories. `depth` is the depth of the container holding the
    /// entry.
    fn visit_entry(
        ctx: &mut TraversalContext<'_, Self>,
        entry: SourceEntry<'_>,
        meta: EntryMeta,
        nested: Option<ContainerKind>,
        depth: usize,
    ) -> Result<()>;
}
