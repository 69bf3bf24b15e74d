//! Container kinds and their entry sources.

pub mod detect;
pub mod source;
pub mod zip;

pub use detect::ContainerKind;
pub use detect::resolve_container;
pub use source::EntrySource;
pub use source::MAX_CONSECUTIVE_DECODE_FAULTS;
pub use source::ReadSeek;
pub use source::SourceEntry;
pub use zip::ZipArchiveSource;
pub use zip::ZipEntrySource;
