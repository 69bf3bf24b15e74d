//! ZIP entry sources.
//!
//! Files on disk are decoded through their central directory with
//! [`ZipArchiveSource`]. The content stream of an entry inside an enclosing
//! archive can only be read forward, so it goes through [`ZipEntrySource`].

use std::io::Chain;
use std::io::Cursor;
use std::io::Read;
use std::io::Seek;

use tracing::trace;
use zip::ZipArchive;
use zip::read::read_zipfile_from_stream;

use super::source::EntrySource;
use super::source::MAX_CONSECUTIVE_DECODE_FAULTS;
use super::source::SourceEntry;
use crate::DecodeFault;
use crate::FaultSink;
use crate::Result;

/// Signature of the end-of-central-directory record, little endian.
const END_OF_CENTRAL_DIRECTORY_SIGNATURE: [u8; 4] = [0x50, 0x4b, 0x05, 0x06];

/// Reads ZIP local file headers front to back without seeking.
///
/// Works on any byte stream, including the content stream of an entry in an
/// enclosing archive. The central directory is never consulted, so entries
/// written with data descriptors cannot be sized and show up as decode
/// faults. An archive with no entries at all ends cleanly.
pub struct ZipEntrySource<'r> {
    reader: Chain<Cursor<Vec<u8>>, &'r mut dyn Read>,
    container: String,
    started: bool,
}

impl<'r> ZipEntrySource<'r> {
    /// Creates a source over `reader`, reporting faults under `container`.
    pub fn new(reader: &'r mut dyn Read, container: impl Into<String>) -> Self {
        Self {
            reader: Cursor::new(Vec::new()).chain(reader),
            container: container.into(),
            started: false,
        }
    }

    /// Peeks at the first record and reports whether the archive is empty.
    ///
    /// The peeked bytes are pushed back in front of the stream.
    fn is_empty_archive(&mut self) -> bool {
        let (pushback, inner) = self.reader.get_mut();
        let mut signature = [0u8; 4];
        let mut filled = 0;

        while filled < signature.len() {
            match inner.read(&mut signature[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
                Err(e) => {
                    trace!(container = %self.container, error = %e, "failed to peek first record");
                    break;
                }
            }
        }

        *pushback = Cursor::new(signature[..filled].to_vec());
        signature == END_OF_CENTRAL_DIRECTORY_SIGNATURE
    }
}

impl EntrySource for ZipEntrySource<'_> {
    fn next_entry<C, F, T>(&mut self, cx: &mut C, visit: F) -> Result<Option<T>>
    where
        C: FaultSink + ?Sized,
        F: FnOnce(&mut C, SourceEntry<'_>) -> Result<T>,
    {
        if !self.started {
            self.started = true;
            if self.is_empty_archive() {
                trace!(container = %self.container, "empty archive");
                return Ok(None);
            }
        }

        let mut faults = 0;

        let file = loop {
            match read_zipfile_from_stream(&mut self.reader) {
                Ok(file) => break file,
                Err(err) => {
                    faults += 1;
                    cx.on_decode_fault(&DecodeFault::new(
                        &self.container,
                        faults,
                        err.to_string(),
                    ));
                    if faults > MAX_CONSECUTIVE_DECODE_FAULTS {
                        break None;
                    }
                }
            }
        };

        let Some(file) = file else {
            trace!(container = %self.container, faults, "end of entries");
            return Ok(None);
        };

        let entry = SourceEntry {
            name: file.name().to_string(),
            size: file.size(),
            compressed_size: file.compressed_size(),
            is_dir: file.is_dir(),
            reader: Box::new(file),
        };

        visit(cx, entry).map(Some)
    }

    fn container_name(&self) -> &str {
        &self.container
    }
}

/// Reads a seekable ZIP file in central-directory order.
///
/// Sizes come from the central directory, so entries written by streaming
/// encoders (with data descriptors) decode normally.
pub struct ZipArchiveSource<R> {
    archive: ZipArchive<R>,
    container: String,
    next_index: usize,
}

impl<R: Read + Seek> ZipArchiveSource<R> {
    /// Wraps an opened archive, reporting faults under `container`.
    pub fn new(archive: ZipArchive<R>, container: impl Into<String>) -> Self {
        Self {
            archive,
            container: container.into(),
            next_index: 0,
        }
    }
}

impl<R: Read + Seek> EntrySource for ZipArchiveSource<R> {
    fn next_entry<C, F, T>(&mut self, cx: &mut C, visit: F) -> Result<Option<T>>
    where
        C: FaultSink + ?Sized,
        F: FnOnce(&mut C, SourceEntry<'_>) -> Result<T>,
    {
        let mut faults = 0;

        loop {
            if self.next_index >= self.archive.len() {
                trace!(container = %self.container, faults, "end of entries");
                return Ok(None);
            }
            let index = self.next_index;
            self.next_index += 1;

            match self.archive.by_index(index) {
                Ok(file) => {
                    let entry = SourceEntry {
                        name: file.name().to_string(),
                        size: file.size(),
                        compressed_size: file.compressed_size(),
                        is_dir: file.is_dir(),
                        reader: Box::new(file),
                    };
                    return visit(cx, entry).map(Some);
                }
                Err(err) => {
                    faults += 1;
                    cx.on_decode_fault(&DecodeFault::new(
                        &self.container,
                        faults,
                        err.to_string(),
                    ));
                    if faults > MAX_CONSECUTIVE_DECODE_FAULTS {
                        trace!(container = %self.container, faults, "giving up on container");
                        return Ok(None);
                    }
                }
            }
        }
    }

    fn container_name(&self) -> &str {
        &self.container
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::ZipTestBuilder;
    use crate::test_utils::streamed_archive;

    fn collect_names(data: Vec<u8>, faults: &mut Vec<DecodeFault>) -> Vec<(String, String)> {
        let mut cursor = Cursor::new(data);
        let mut source = ZipEntrySource::new(&mut cursor, "test.zip");
        let mut sink = |fault: &DecodeFault| faults.push(fault.clone());
        let mut names = Vec::new();

        while let Some(item) = source
            .next_entry(&mut sink, |_, mut entry| {
                let mut content = String::new();
                entry.reader.read_to_string(&mut content)?;
                Ok((entry.name, content))
            })
            .unwrap()
        {
            names.push(item);
        }
        names
    }

    #[test]
    fn test_reads_entries_in_order() {
        let data = ZipTestBuilder::new()
            .add_file("a.txt", b"alpha")
            .add_file("dir/b.txt", b"beta")
            .build();

        let mut faults = Vec::new();
        let entries = collect_names(data, &mut faults);

        assert_eq!(
            entries,
            vec![
                ("a.txt".to_string(), "alpha".to_string()),
                ("dir/b.txt".to_string(), "beta".to_string()),
            ]
        );
        assert!(faults.is_empty());
    }

    #[test]
    fn test_unread_entry_is_skipped() {
        let data = ZipTestBuilder::new()
            .add_file("skip.bin", &[7u8; 4096])
            .add_file("keep.txt", b"kept")
            .build();

        let mut cursor = Cursor::new(data);
        let mut source = ZipEntrySource::new(&mut cursor, "test.zip");
        let mut sink = crate::NoopSink;

        let first = source
            .next_entry(&mut sink, |_, entry| Ok(entry.name))
            .unwrap();
        assert_eq!(first.as_deref(), Some("skip.bin"));

        let second = source
            .next_entry(&mut sink, |_, mut entry| {
                let mut content = String::new();
                entry.reader.read_to_string(&mut content)?;
                Ok(content)
            })
            .unwrap();
        assert_eq!(second.as_deref(), Some("kept"));
    }

    #[test]
    fn test_directory_entry_flag() {
        let data = ZipTestBuilder::new()
            .add_directory("docs/")
            .add_file("docs/readme.txt", b"hi")
            .build();

        let mut cursor = Cursor::new(data);
        let mut source = ZipEntrySource::new(&mut cursor, "test.zip");
        let mut sink = crate::NoopSink;

        let first = source
            .next_entry(&mut sink, |_, entry| Ok((entry.name, entry.is_dir)))
            .unwrap()
            .unwrap();
        assert_eq!(first, ("docs/".to_string(), true));
    }

    #[test]
    fn test_sizes_reported() {
        let data = ZipTestBuilder::new().add_file("a.txt", b"12345").build();

        let mut cursor = Cursor::new(data);
        let mut source = ZipEntrySource::new(&mut cursor, "test.zip");
        let mut sink = crate::NoopSink;

        let sizes = source
            .next_entry(&mut sink, |_, entry| Ok((entry.size, entry.compressed_size)))
            .unwrap();
        assert_eq!(sizes, Some((5, 5)));
    }

    #[test]
    fn test_empty_stream_reports_bounded_faults() {
        let mut faults = Vec::new();
        let entries = collect_names(Vec::new(), &mut faults);

        assert!(entries.is_empty());
        assert_eq!(faults.len(), MAX_CONSECUTIVE_DECODE_FAULTS + 1);
        assert_eq!(faults[0].attempt, 1);
        assert_eq!(faults.last().unwrap().attempt, MAX_CONSECUTIVE_DECODE_FAULTS + 1);
        assert!(faults.iter().all(|f| f.container == "test.zip"));
    }

    #[test]
    fn test_garbage_stream_terminates() {
        let mut faults = Vec::new();
        let entries = collect_names(vec![0x41; 64], &mut faults);

        assert!(entries.is_empty());
        assert_eq!(faults.len(), MAX_CONSECUTIVE_DECODE_FAULTS + 1);
    }

    #[test]
    fn test_visitor_error_propagates() {
        let data = ZipTestBuilder::new().add_file("a.txt", b"alpha").build();

        let mut cursor = Cursor::new(data);
        let mut source = ZipEntrySource::new(&mut cursor, "test.zip");
        let mut sink = crate::NoopSink;

        let result: Result<Option<()>> = source.next_entry(&mut sink, |_, _| {
            Err(crate::TraversalError::Io(std::io::Error::other("visitor failed")))
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_container_name() {
        let mut cursor = Cursor::new(Vec::new());
        let source = ZipEntrySource::new(&mut cursor, "outer.zip");
        assert_eq!(source.container_name(), "outer.zip");
    }

    #[test]
    fn test_empty_archive_stream_ends_cleanly() {
        let mut faults = Vec::new();
        let entries = collect_names(ZipTestBuilder::new().build(), &mut faults);

        assert!(entries.is_empty());
        assert!(faults.is_empty());
    }

    #[test]
    fn test_archive_source_reads_data_descriptor_entries() {
        let data = streamed_archive(&[("a.txt", b"alpha"), ("b.txt", b"beta")]);
        let archive = ZipArchive::new(Cursor::new(data)).unwrap();
        let mut source = ZipArchiveSource::new(archive, "streamed.zip");
        let mut faults = Vec::new();
        let mut sink = |fault: &DecodeFault| faults.push(fault.clone());

        let mut entries = Vec::new();
        while let Some(item) = source
            .next_entry(&mut sink, |_, mut entry| {
                let mut content = String::new();
                entry.reader.read_to_string(&mut content)?;
                Ok((entry.name, entry.size, content))
            })
            .unwrap()
        {
            entries.push(item);
        }

        assert_eq!(
            entries,
            vec![
                ("a.txt".to_string(), 5, "alpha".to_string()),
                ("b.txt".to_string(), 4, "beta".to_string()),
            ]
        );
        assert!(faults.is_empty());
        assert_eq!(source.container_name(), "streamed.zip");
    }

    #[test]
    fn test_archive_source_empty_archive() {
        let data = ZipTestBuilder::new().build();
        let archive = ZipArchive::new(Cursor::new(data)).unwrap();
        let mut source = ZipArchiveSource::new(archive, "empty.zip");
        let mut sink = crate::NoopSink;

        let next: Option<()> = source.next_entry(&mut sink, |_, _| Ok(())).unwrap();
        assert!(next.is_none());
    }
}
