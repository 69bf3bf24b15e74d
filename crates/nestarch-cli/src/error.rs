//! Error conversion utilities for CLI.
//!
//! Converts nestarch-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use nestarch_core::ContainerKind;
use nestarch_core::TraversalError;
use std::path::Path;

/// Converts `TraversalError` to user-friendly anyhow error with context
pub fn convert_traversal_error(err: TraversalError, archive: &Path) -> anyhow::Error {
    match err {
        TraversalError::InvalidScratchRoot { path, reason } => {
            anyhow!(
                "Cannot use scratch directory '{}': {}\n\
                 HINT: Create the directory first or pass an existing one with --scratch-dir.",
                path.display(),
                reason
            )
        }
        TraversalError::InvalidConfig { reason } => {
            anyhow!(
                "Invalid traversal settings for '{}': {}\n\
                 HINT: --max-depth and --buffer-size must be at least 1.",
                archive.display(),
                reason
            )
        }
        TraversalError::UnsupportedContainer { name } => {
            anyhow!(
                "Not an archive: '{}' (while processing '{}')\n\
                 HINT: Supported formats: {}",
                name,
                archive.display(),
                supported_formats()
            )
        }
        TraversalError::UnimplementedContainer { name, kind } => {
            anyhow!(
                "Archive format '{}' is recognized but not supported: '{}' (while processing '{}')\n\
                 HINT: Lower --max-depth to stop before this entry, or exclude it with --include.",
                kind,
                name,
                archive.display()
            )
        }
        TraversalError::Io(io_err) => {
            anyhow!(
                "I/O error while processing '{}': {}",
                archive.display(),
                io_err
            )
        }
    }
}

/// Adds context to a generic error about archive operations
pub fn add_archive_context<T>(
    result: Result<T, TraversalError>,
    archive: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_traversal_error(e, archive))
}

fn supported_formats() -> String {
    ContainerKind::ALL
        .into_iter()
        .filter(|kind| kind.is_implemented())
        .map(|kind| kind.extension())
        .collect::<Vec<_>>()
        .join(", ")
}
