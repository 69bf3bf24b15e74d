//! Peek command implementation.

use crate::cli::PeekArgs;
use crate::error::add_archive_context;
use crate::error::convert_traversal_error;
use crate::output::OutputFormatter;
use crate::output::TraversalSummary;
use anyhow::Result;
use nestarch_core::DecodeFault;
use nestarch_core::Outcome;
use nestarch_core::ScratchResources;
use nestarch_core::peek_archive_with_sink;
use std::env;

/// Lists entries, descending into selected nested archives.
///
/// Nested archives are staged under the scratch directory (the system temp
/// directory by default) and always removed before returning.
pub fn execute(args: &PeekArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let scratch_root = args.traversal.scratch_dir_or(env::temp_dir());
    let config = args.traversal.config()?;

    let mut faults = Vec::new();
    let outcome = add_archive_context(
        peek_archive_with_sink(
            &args.archive,
            &scratch_root,
            &config,
            |meta| args.traversal.selects(meta),
            &mut |fault: &DecodeFault| faults.push(fault.clone()),
        ),
        &args.archive,
    )?;

    if let Err(e) = outcome.cleanup() {
        formatter.format_warning(&format!("failed to remove scratch directories: {e}"));
    }

    match outcome {
        Outcome::Success(success) => {
            formatter.format_peek_result(&TraversalSummary {
                archive: &args.archive,
                entries: &success.entries,
                fully_read: success.fully_read,
                faults: &faults,
                cleaned_up: true,
            })
        }
        Outcome::Fail(fail) => {
            for fault in &faults {
                formatter.format_warning(&fault.to_string());
            }

            let partial = fail.entries.len();
            Err(convert_traversal_error(fail.error, &args.archive)
                .context(format!("peek aborted after {partial} entries")))
        }
    }
}
