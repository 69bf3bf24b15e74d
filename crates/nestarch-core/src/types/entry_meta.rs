//! Metadata describing one discovered archive entry.

/// Immutable description of one archive entry.
///
/// Produced exactly once, when the entry header is decoded. The `index` is
/// global across the whole traversal, including nested containers, and
/// strictly increases in discovery order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryMeta {
    file_name: String,
    parent_archive_name: String,
    path_in_archive: String,
    full_path: String,
    size: u64,
    compressed_size: u64,
    index: usize,
    is_dir: bool,
}

impl EntryMeta {
    /// Builds the metadata for an entry named `entry_name` inside the
    /// container `parent_archive_name`, whose own full path is
    /// `parent_full_path` (empty for the root archive).
    ///
    /// # Examples
    ///
    /// ```
    /// use nestarch_core::EntryMeta;
    ///
    /// let meta = EntryMeta::new(0, "f/nested_zip.zip", "test.zip", "", 120, 120, false);
    /// assert_eq!(meta.file_name(), "nested_zip.zip");
    /// assert_eq!(meta.path_in_archive(), "f/nested_zip.zip");
    /// assert_eq!(meta.full_path(), "/f/nested_zip.zip");
    /// ```
    #[must_use]
    pub fn new(
        index: usize,
        entry_name: &str,
        parent_archive_name: &str,
        parent_full_path: &str,
        size: u64,
        compressed_size: u64,
        is_dir: bool,
    ) -> Self {
        let path_in_archive = entry_name.trim_end_matches('/');
        let file_name = path_in_archive
            .rsplit('/')
            .next()
            .unwrap_or(path_in_archive);

        Self {
            file_name: file_name.to_string(),
            parent_archive_name: parent_archive_name.to_string(),
            path_in_archive: path_in_archive.to_string(),
            full_path: format!("{parent_full_path}/{entry_name}"),
            size,
            compressed_size,
            index,
            is_dir,
        }
    }

    /// Base name of the entry (last path segment).
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Name of the immediate parent container.
    #[must_use]
    pub fn parent_archive_name(&self) -> &str {
        &self.parent_archive_name
    }

    /// Path of the entry within its parent container.
    #[must_use]
    pub fn path_in_archive(&self) -> &str {
        &self.path_in_archive
    }

    /// Slash-joined chain of container and entry names from the root.
    #[must_use]
    pub fn full_path(&self) -> &str {
        &self.full_path
    }

    /// Declared uncompressed size in bytes.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.size
    }

    /// Compressed size in bytes.
    #[must_use]
    pub const fn compressed_size(&self) -> u64 {
        self.compressed_size
    }

    /// Global discovery index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Whether the container marks this entry as a directory.
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        self.is_dir
    }
}
