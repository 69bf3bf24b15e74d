//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use super::formatter::TraversalSummary;
use anyhow::Result;
use console::Term;
use console::style;
use nestarch_core::DecodeFault;
use nestarch_core::EntryMeta;
use nestarch_core::ExtractedEntry;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();
        let mut count = 0;

        for c in s.chars().rev() {
            if count == 3 {
                result.push(',');
                count = 0;
            }
            result.push(c);
            count += 1;
        }

        result.chars().rev().collect()
    }

    fn write_header<T>(&self, action: &str, summary: &TraversalSummary<'_, T>) {
        let line = format!(
            "{action} {}: {} entries",
            summary.archive.display(),
            Self::format_number(summary.entries.len())
        );
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {line}", style("✓").green().bold()));
        } else {
            let _ = self.term.write_line(&line);
        }
    }

    fn write_footer<T>(&self, summary: &TraversalSummary<'_, T>) {
        for fault in summary.faults {
            self.format_warning(&Self::describe_fault(fault));
        }

        if !summary.fully_read {
            self.format_warning("iteration ceiling reached; results are incomplete");
        }

        if self.verbose && summary.cleaned_up {
            let _ = self.term.write_line("  Scratch directories removed");
        }
    }

    fn describe_fault(fault: &DecodeFault) -> String {
        format!(
            "skipped undecodable entry in {} (attempt {}): {}",
            fault.container, fault.attempt, fault.reason
        )
    }

    fn entry_line(meta: &EntryMeta) -> String {
        let kind = if meta.is_dir() { "d" } else { "-" };
        format!(
            "{kind} {:>6} {:>10}  {}",
            meta.index(),
            Self::format_size(meta.size()),
            meta.full_path()
        )
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_extraction_result(
        &self,
        summary: &TraversalSummary<'_, ExtractedEntry>,
    ) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.write_header("Extracted", summary);

        for entry in summary.entries {
            let _ = self
                .term
                .write_line(&format!("  {}", Self::entry_line(entry.meta())));
            if self.verbose {
                let _ = self
                    .term
                    .write_line(&format!("           -> {}", entry.path().display()));
            }
        }

        let total: u64 = summary.entries.iter().map(|e| e.meta().size()).sum();
        let _ = self
            .term
            .write_line(&format!("  Total size: {}", Self::format_size(total)));

        self.write_footer(summary);
        Ok(())
    }

    fn format_peek_result(&self, summary: &TraversalSummary<'_, EntryMeta>) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        self.write_header("Peeked", summary);

        for meta in summary.entries {
            let _ = self.term.write_line(&format!("  {}", Self::entry_line(meta)));
            if self.verbose {
                let _ = self.term.write_line(&format!(
                    "           in {} (compressed {})",
                    meta.parent_archive_name(),
                    Self::format_size(meta.compressed_size())
                ));
            }
        }

        self.write_footer(summary);
        Ok(())
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        // Warnings go to stderr so listings stay pipeable.
        let term = Term::stderr();
        if self.use_colors {
            let _ = term.write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = term.write_line(&format!("WARNING: {message}"));
        }
    }
}
