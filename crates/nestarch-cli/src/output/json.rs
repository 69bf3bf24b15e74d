//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use super::formatter::TraversalSummary;
use anyhow::Result;
use nestarch_core::DecodeFault;
use nestarch_core::EntryMeta;
use nestarch_core::ExtractedEntry;
use serde::Serialize;
use std::io::Write;
use std::io::{self};

pub struct JsonFormatter;

#[derive(Serialize)]
struct EntryOutput {
    index: usize,
    file_name: String,
    path_in_archive: String,
    full_path: String,
    parent_archive: String,
    size: u64,
    compressed_size: u64,
    is_dir: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    extracted_path: Option<String>,
}

impl EntryOutput {
    fn from_meta(meta: &EntryMeta) -> Self {
        Self {
            index: meta.index(),
            file_name: meta.file_name().to_string(),
            path_in_archive: meta.path_in_archive().to_string(),
            full_path: meta.full_path().to_string(),
            parent_archive: meta.parent_archive_name().to_string(),
            size: meta.size(),
            compressed_size: meta.compressed_size(),
            is_dir: meta.is_dir(),
            extracted_path: None,
        }
    }

    fn from_extracted(entry: &ExtractedEntry) -> Self {
        Self {
            extracted_path: Some(entry.path().display().to_string()),
            ..Self::from_meta(entry.meta())
        }
    }
}

#[derive(Serialize)]
struct FaultOutput {
    container: String,
    attempt: usize,
    reason: String,
}

impl From<&DecodeFault> for FaultOutput {
    fn from(fault: &DecodeFault) -> Self {
        Self {
            container: fault.container.clone(),
            attempt: fault.attempt,
            reason: fault.reason.clone(),
        }
    }
}

#[derive(Serialize)]
struct TraversalOutput {
    archive: String,
    fully_read: bool,
    cleaned_up: bool,
    entry_count: usize,
    entries: Vec<EntryOutput>,
    decode_faults: Vec<FaultOutput>,
}

impl TraversalOutput {
    fn new<T>(summary: &TraversalSummary<'_, T>, entries: Vec<EntryOutput>) -> Self {
        Self {
            archive: summary.archive.display().to_string(),
            fully_read: summary.fully_read,
            cleaned_up: summary.cleaned_up,
            entry_count: entries.len(),
            entries,
            decode_faults: summary.faults.iter().map(FaultOutput::from).collect(),
        }
    }
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_extraction_result(
        &self,
        summary: &TraversalSummary<'_, ExtractedEntry>,
    ) -> Result<()> {
        let entries = summary
            .entries
            .iter()
            .map(EntryOutput::from_extracted)
            .collect();
        let data = TraversalOutput::new(summary, entries);

        Self::output(&JsonOutput::new("extract", summary.fully_read, data))
    }

    fn format_peek_result(&self, summary: &TraversalSummary<'_, EntryMeta>) -> Result<()> {
        let entries = summary.entries.iter().map(EntryOutput::from_meta).collect();
        let data = TraversalOutput::new(summary, entries);

        Self::output(&JsonOutput::new("peek", summary.fully_read, data))
    }

    fn format_warning(&self, message: &str) {
        // stdout carries exactly one JSON document.
        let _ = writeln!(io::stderr(), "WARNING: {message}");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_entry_output_fields() {
        let meta = EntryMeta::new(3, "f/nested_text.txt", "inner.zip", "/f/inner.zip", 5, 7, false);
        let json = serde_json::to_value(EntryOutput::from_meta(&meta)).unwrap();

        assert_eq!(json["index"], 3);
        assert_eq!(json["file_name"], "nested_text.txt");
        assert_eq!(json["full_path"], "/f/inner.zip/f/nested_text.txt");
        assert_eq!(json["parent_archive"], "inner.zip");
        assert!(json.get("extracted_path").is_none());
    }

    #[test]
    fn test_traversal_output_includes_faults() {
        let faults = vec![DecodeFault::new("outer.zip", 1, "bad header")];
        let metas = vec![EntryMeta::new(0, "a.txt", "outer.zip", "", 1, 1, false)];
        let summary = TraversalSummary {
            archive: Path::new("outer.zip"),
            entries: &metas,
            fully_read: false,
            faults: &faults,
            cleaned_up: true,
        };

        let entries = metas.iter().map(EntryOutput::from_meta).collect();
        let json = serde_json::to_value(TraversalOutput::new(&summary, entries)).unwrap();

        assert_eq!(json["entry_count"], 1);
        assert_eq!(json["fully_read"], false);
        assert_eq!(json["cleaned_up"], true);
        assert_eq!(json["decode_faults"][0]["container"], "outer.zip");
        assert_eq!(json["decode_faults"][0]["attempt"], 1);
    }
}
