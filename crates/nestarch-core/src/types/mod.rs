//! Core value types produced and consumed by a traversal.

pub mod entry_meta;
pub mod extracted;
pub mod scratch_root;

pub use entry_meta::EntryMeta;
pub use extracted::ExtractedEntry;
pub use scratch_root::ScratchRoot;
