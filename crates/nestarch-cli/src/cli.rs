//! CLI argument parsing using clap.

use anyhow::Context;
use anyhow::Result;
use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use nestarch_core::EntryMeta;
use nestarch_core::TraversalConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nestarch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract entries, descending into nested archives
    Extract(ExtractArgs),
    /// List entries of an archive and its nested archives
    Peek(PeekArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Path to the root archive
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    #[command(flatten)]
    pub traversal: TraversalArgs,

    /// Remove the scratch directories after reporting
    #[arg(long)]
    pub cleanup: bool,
}

#[derive(clap::Args)]
pub struct PeekArgs {
    /// Path to the root archive
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    #[command(flatten)]
    pub traversal: TraversalArgs,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Limits and selection shared by `extract` and `peek`.
#[derive(clap::Args)]
pub struct TraversalArgs {
    /// Existing directory that receives scratch subdirectories
    #[arg(short, long, value_name = "DIR")]
    pub scratch_dir: Option<PathBuf>,

    /// Maximum nesting depth (1 = root archive only)
    #[arg(short = 'd', long, default_value_t = 1)]
    pub max_depth: usize,

    /// Maximum number of entries visited across all nesting levels
    #[arg(long, default_value_t = 10_000)]
    pub iteration_ceiling: usize,

    /// I/O buffer size in bytes (suffixes K, M, G)
    #[arg(long, default_value = "16K", value_parser = parse_byte_size)]
    pub buffer_size: u64,

    /// Select entries whose file name ends with SUFFIX (repeatable; default: all)
    #[arg(short, long = "include", value_name = "SUFFIX")]
    pub include: Vec<String>,
}

impl TraversalArgs {
    /// Builds the library configuration from the flags.
    pub fn config(&self) -> Result<TraversalConfig> {
        let buffer_size =
            usize::try_from(self.buffer_size).context("buffer size does not fit in memory")?;

        Ok(TraversalConfig::default()
            .with_max_depth(self.max_depth)
            .with_iteration_ceiling(self.iteration_ceiling)
            .with_buffer_size(buffer_size))
    }

    /// Returns the scratch directory, or `default` if none was given.
    pub fn scratch_dir_or(&self, default: PathBuf) -> PathBuf {
        self.scratch_dir.clone().unwrap_or(default)
    }

    /// Entry selection by file-name suffix.
    pub fn selects(&self, meta: &EntryMeta) -> bool {
        self.include.is_empty()
            || self
                .include
                .iter()
                .any(|suffix| meta.file_name().ends_with(suffix.as_str()))
    }
}

/// Parse byte size with optional suffix (K, M, G)
#[allow(clippy::option_if_let_else)]
fn parse_byte_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty byte size".to_string());
    }

    let (num_str, multiplier) = if let Some(stripped) = s.strip_suffix('G') {
        (stripped, 1024_u64.pow(3))
    } else if let Some(stripped) = s.strip_suffix('M') {
        (stripped, 1024_u64.pow(2))
    } else if let Some(stripped) = s.strip_suffix('K') {
        (stripped, 1024)
    } else {
        (s, 1)
    };

    num_str
        .parse::<u64>()
        .map_err(|_| format!("invalid byte size: {s}"))
        .and_then(|n| {
            n.checked_mul(multiplier)
                .ok_or_else(|| format!("byte size overflow: {s}"))
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_parse_byte_size() {
        assert_eq!(parse_byte_size("100").unwrap(), 100);
        assert_eq!(parse_byte_size("1K").unwrap(), 1024);
        assert_eq!(parse_byte_size("2M").unwrap(), 2 * 1024 * 1024);
        assert_eq!(parse_byte_size("3G").unwrap(), 3 * 1024 * 1024 * 1024);
        assert!(parse_byte_size("invalid").is_err());
        assert!(parse_byte_size("").is_err());
    }

    #[test]
    fn test_parse_byte_size_overflow() {
        assert!(parse_byte_size("18446744073709551615K").is_err());
        assert!(parse_byte_size("17592186044416G").is_err());
    }

    #[test]
    fn test_extract_defaults() {
        let cli = parse(&["nestarch", "extract", "outer.zip"]);
        let Commands::Extract(args) = cli.command else {
            panic!("expected extract command");
        };

        let config = args.traversal.config().unwrap();
        assert_eq!(config, TraversalConfig::default());
        assert!(args.traversal.scratch_dir.is_none());
        assert!(args.traversal.include.is_empty());
        assert!(!args.cleanup);
    }

    #[test]
    fn test_peek_flags() {
        let cli = parse(&[
            "nestarch",
            "peek",
            "outer.zip",
            "--max-depth",
            "3",
            "--iteration-ceiling",
            "50",
            "--buffer-size",
            "64K",
            "--include",
            ".txt",
            "-i",
            ".zip",
            "--scratch-dir",
            "/tmp/scratch",
        ]);
        let Commands::Peek(args) = cli.command else {
            panic!("expected peek command");
        };

        let config = args.traversal.config().unwrap();
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.iteration_ceiling, 50);
        assert_eq!(config.buffer_size, 64 * 1024);
        assert_eq!(args.traversal.include, vec![".txt", ".zip"]);
        assert_eq!(
            args.traversal.scratch_dir_or(PathBuf::from("/unused")),
            PathBuf::from("/tmp/scratch")
        );
    }

    #[test]
    fn test_selects_by_suffix() {
        let cli = parse(&["nestarch", "extract", "outer.zip", "-i", ".txt"]);
        let Commands::Extract(args) = cli.command else {
            panic!("expected extract command");
        };

        let text = EntryMeta::new(0, "dir/a.txt", "outer.zip", "", 1, 1, false);
        let nested = EntryMeta::new(1, "inner.zip", "outer.zip", "", 1, 1, false);
        assert!(args.traversal.selects(&text));
        assert!(!args.traversal.selects(&nested));
    }

    #[test]
    fn test_selects_all_without_include() {
        let cli = parse(&["nestarch", "peek", "outer.zip"]);
        let Commands::Peek(args) = cli.command else {
            panic!("expected peek command");
        };

        let meta = EntryMeta::new(0, "anything.bin", "outer.zip", "", 1, 1, false);
        assert!(args.traversal.selects(&meta));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["nestarch", "-q", "-v", "peek", "a.zip"]).is_err());
    }
}
