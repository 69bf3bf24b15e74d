//! Test utilities for building nested archives.
//!
//! This module provides reusable helpers for creating in-memory ZIP archives,
//! including archives that contain other archives as entries.
//!
//! # Panics
//!
//! All functions in this module may panic on I/O errors since they are
//! designed for test use only where panics are acceptable.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

/// Content of the top-level text file in [`sample_nested_archive`].
pub const SAMPLE_TEXT: &str = "test text text text text text";

/// Content of the text file inside the nested archive of
/// [`sample_nested_archive`].
pub const NESTED_TEXT: &str = "test nested text";

/// Builder for creating ZIP test archives.
///
/// Entries are always stored uncompressed, so the archive can be decoded
/// front to back from a plain stream.
///
/// # Examples
///
/// ```
/// use nestarch_core::test_utils::ZipTestBuilder;
///
/// let inner = ZipTestBuilder::new().add_file("inner.txt", b"inside");
/// let zip_data = ZipTestBuilder::new()
///     .add_file("file.txt", b"content")
///     .add_directory("dir/")
///     .add_archive("dir/inner.zip", inner)
///     .build();
/// assert!(!zip_data.is_empty());
/// ```
pub struct ZipTestBuilder {
    zip: zip::ZipWriter<Cursor<Vec<u8>>>,
}

impl ZipTestBuilder {
    /// Creates a new ZIP test builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            zip: zip::ZipWriter::new(Cursor::new(Vec::new())),
        }
    }

    /// Adds a regular file to the archive.
    #[must_use]
    pub fn add_file(mut self, path: &str, data: &[u8]) -> Self {
        use zip::write::SimpleFileOptions;

        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored)
            .unix_permissions(0o644);

        self.zip.start_file(path, options).unwrap();
        self.zip.write_all(data).unwrap();
        self
    }

    /// Builds `inner` and stores it as an entry named `path`.
    #[must_use]
    pub fn add_archive(self, path: &str, inner: Self) -> Self {
        let data = inner.build();
        self.add_file(path, &data)
    }

    /// Adds a directory to the archive.
    #[must_use]
    pub fn add_directory(mut self, path: &str) -> Self {
        use zip::write::SimpleFileOptions;

        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored)
            .unix_permissions(0o755);
        self.zip.add_directory(path, options).unwrap();
        self
    }

    /// Builds and returns the ZIP archive data.
    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.zip.finish().unwrap().into_inner()
    }

    /// Builds the archive and writes it to `dir/file_name`.
    ///
    /// Returns the path of the written file.
    pub fn write_to(self, dir: &Path, file_name: &str) -> PathBuf {
        let path = dir.join(file_name);
        std::fs::write(&path, self.build()).unwrap();
        path
    }
}

impl Default for ZipTestBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds an archive the way streaming encoders do.
///
/// Entries are deflated and written through a non-seekable writer, so their
/// sizes live only in trailing data descriptors and the central directory.
#[must_use]
pub fn streamed_archive(files: &[(&str, &[u8])]) -> Vec<u8> {
    use zip::write::SimpleFileOptions;

    let options =
        SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated);
    let mut zip = zip::ZipWriter::new_stream(Vec::new());
    for (path, data) in files {
        zip.start_file(*path, options).unwrap();
        zip.write_all(data).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

/// Builds the reference two-level archive.
///
/// Layout, in stream order:
///
/// ```text
/// f/nested_zip.zip
///     nested_folder/nested_text.txt   "test nested text"
/// text.txt                            "test text text text text text"
/// ```
///
/// Walking it with depth 2 discovers three entries, with depth 1 two.
#[must_use]
pub fn sample_nested_archive() -> ZipTestBuilder {
    let nested =
        ZipTestBuilder::new().add_file("nested_folder/nested_text.txt", NESTED_TEXT.as_bytes());

    ZipTestBuilder::new()
        .add_archive("f/nested_zip.zip", nested)
        .add_file("text.txt", SAMPLE_TEXT.as_bytes())
}

/// Builds a chain of `levels` archives, each holding one text file and the
/// next archive.
///
/// Level `n` (starting at 1) stores `file_n.txt` followed by `level_{n+1}.zip`.
/// The innermost level stores only its text file.
#[must_use]
pub fn chained_archive(levels: usize) -> ZipTestBuilder {
    let mut current: Option<ZipTestBuilder> = None;

    for level in (1..=levels).rev() {
        let mut builder = ZipTestBuilder::new()
            .add_file(&format!("file_{level}.txt"), format!("level {level}").as_bytes());
        if let Some(inner) = current.take() {
            builder = builder.add_archive(&format!("level_{}.zip", level + 1), inner);
        }
        current = Some(builder);
    }

    current.unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_streamed_archive_readable() {
        let data = streamed_archive(&[("a.txt", b"alpha"), ("b.txt", b"beta")]);
        let mut archive = zip::ZipArchive::new(Cursor::new(data)).unwrap();
        assert_eq!(archive.len(), 2);

        let mut content = String::new();
        std::io::Read::read_to_string(&mut archive.by_index(1).unwrap(), &mut content).unwrap();
        assert_eq!(content, "beta");
    }

    #[test]
    fn test_zip_builder() {
        let zip_data = ZipTestBuilder::new()
            .add_file("file.txt", b"content")
            .add_directory("dir/")
            .build();
        assert!(!zip_data.is_empty());
    }

    #[test]
    fn test_sample_nested_archive() {
        let data = sample_nested_archive().build();
        let archive = zip::ZipArchive::new(Cursor::new(data)).unwrap();
        let names: Vec<_> = archive.file_names().collect();
        assert!(names.contains(&"f/nested_zip.zip"));
        assert!(names.contains(&"text.txt"));
    }

    #[test]
    fn test_chained_archive_layout() {
        let data = chained_archive(3).build();
        let archive = zip::ZipArchive::new(Cursor::new(data)).unwrap();
        assert_eq!(archive.len(), 2);
    }

    #[test]
    fn test_write_to() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = sample_nested_archive().write_to(temp.path(), "test.zip");
        assert!(path.is_file());
        assert!(path.ends_with("test.zip"));
    }
}
