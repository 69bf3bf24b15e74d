//! Entry sources: sequential, single-pass readers over one container.

use std::io::Read;
use std::io::Seek;

use crate::FaultSink;
use crate::Result;

/// Number of consecutive decode faults tolerated after the first one before
/// an entry source gives up and reports end of stream.
///
/// A source therefore makes at most `MAX_CONSECUTIVE_DECODE_FAULTS + 1`
/// attempts per entry.
pub const MAX_CONSECUTIVE_DECODE_FAULTS: usize = 10;

/// A byte source that can also seek, such as a file on disk.
pub trait ReadSeek: Read + Seek {}

impl<T: Read + Seek> ReadSeek for T {}

/// One decoded entry, readable exactly once.
///
/// The reader borrows the underlying container stream. Whatever is not
/// consumed is skipped when the entry is dropped.
pub struct SourceEntry<'a> {
    /// Entry name as stored in the container.
    pub name: String,
    /// Declared uncompressed size.
    pub size: u64,
    /// Compressed size.
    pub compressed_size: u64,
    /// Whether the container marks this entry as a directory.
    pub is_dir: bool,
    /// Entry content stream.
    pub reader: Box<dyn Read + 'a>,
}

impl std::fmt::Debug for SourceEntry<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceEntry")
            .field("name", &self.name)
            .field("size", &self.size)
            .field("compressed_size", &self.compressed_size)
            .field("is_dir", &self.is_dir)
            .finish_non_exhaustive()
    }
}

/// A sequential, single-pass source of container entries.
///
/// Entries are lent to a visitor rather than returned, so each entry's
/// stream is released before the next header is decoded. Decode faults are
/// reported to the context's [`FaultSink`] and retried up to
/// [`MAX_CONSECUTIVE_DECODE_FAULTS`] times.
pub trait EntrySource {
    /// Decodes the next entry and hands it to `visit`.
    ///
    /// Returns `Ok(None)` once the container is exhausted or the retry bound
    /// was exceeded.
    ///
    /// # Errors
    ///
    /// Returns whatever error `visit` returns. Decode faults never surface
    /// here.
    fn next_entry<C, F, T>(&mut self, cx: &mut C, visit: F) -> Result<Option<T>>
    where
        C: FaultSink + ?Sized,
        F: FnOnce(&mut C, SourceEntry<'_>) -> Result<T>;

    /// Name of the container this source decodes.
    fn container_name(&self) -> &str;
}
