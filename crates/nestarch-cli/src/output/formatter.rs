//! Output formatter trait for CLI results.

use anyhow::Result;
use nestarch_core::DecodeFault;
use nestarch_core::EntryMeta;
use nestarch_core::ExtractedEntry;
use serde::Serialize;
use std::path::Path;

/// Everything a formatter needs to report one finished traversal.
pub struct TraversalSummary<'a, T> {
    pub archive: &'a Path,
    pub entries: &'a [T],
    pub fully_read: bool,
    pub faults: &'a [DecodeFault],
    pub cleaned_up: bool,
}

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format extraction result
    fn format_extraction_result(&self, summary: &TraversalSummary<'_, ExtractedEntry>)
    -> Result<()>;

    /// Format peek result
    fn format_peek_result(&self, summary: &TraversalSummary<'_, EntryMeta>) -> Result<()>;

    /// Format warning message
    fn format_warning(&self, message: &str);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    pub data: T,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Every entry within the depth bound was visited.
    Complete,
    /// The iteration ceiling cut the walk short.
    Incomplete,
}

impl Status {
    pub const fn from_fully_read(fully_read: bool) -> Self {
        if fully_read {
            Self::Complete
        } else {
            Self::Incomplete
        }
    }
}

impl<T: Serialize> JsonOutput<T> {
    pub fn new(operation: impl Into<String>, fully_read: bool, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::from_fully_read(fully_read),
            data,
        }
    }
}
