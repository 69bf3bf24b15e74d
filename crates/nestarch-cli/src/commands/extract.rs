//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::error::add_archive_context;
use crate::error::convert_traversal_error;
use crate::output::OutputFormatter;
use crate::output::TraversalSummary;
use anyhow::Context;
use anyhow::Result;
use nestarch_core::DecodeFault;
use nestarch_core::Outcome;
use nestarch_core::ScratchResources;
use nestarch_core::extract_archive_with_sink;
use std::env;

pub fn execute(args: &ExtractArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let scratch_root = match &args.traversal.scratch_dir {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("failed to get current directory")?,
    };
    let config = args.traversal.config()?;

    let mut faults = Vec::new();
    let outcome = add_archive_context(
        extract_archive_with_sink(
            &args.archive,
            &scratch_root,
            &config,
            |meta| args.traversal.selects(meta),
            &mut |fault: &DecodeFault| faults.push(fault.clone()),
        ),
        &args.archive,
    )?;

    match outcome {
        Outcome::Success(success) => {
            formatter.format_extraction_result(&TraversalSummary {
                archive: &args.archive,
                entries: &success.entries,
                fully_read: success.fully_read,
                faults: &faults,
                cleaned_up: args.cleanup,
            })?;

            if args.cleanup {
                success
                    .cleanup()
                    .context("failed to remove scratch directories")?;
            }
            Ok(())
        }
        Outcome::Fail(fail) => {
            for fault in &faults {
                formatter.format_warning(&fault.to_string());
            }
            if let Err(e) = fail.cleanup() {
                formatter.format_warning(&format!("failed to remove scratch directories: {e}"));
            }

            let partial = fail.entries.len();
            Err(convert_traversal_error(fail.error, &args.archive)
                .context(format!("extraction aborted after {partial} entries")))
        }
    }
}
