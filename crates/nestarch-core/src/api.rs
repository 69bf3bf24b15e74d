//! High-level public API for nested archive traversal.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::debug;

use crate::EntryMeta;
use crate::ExtractedEntry;
use crate::FaultSink;
use crate::NoopSink;
use crate::Outcome;
use crate::Result;
use crate::TraversalConfig;
use crate::TraversalError;
use crate::formats::resolve_container;
use crate::traversal::ContainerInput;
use crate::traversal::TraversalContext;
use crate::traversal::TraversalMode;
use crate::traversal::walk_archive;
use crate::types::ScratchRoot;

/// Extracts selected entries of an archive, descending into nested
/// archives, into per-entry scratch directories.
///
/// The container kind of the root archive and of every nested entry is
/// inferred from its file-name extension. Decode faults are tolerated
/// silently; use [`extract_archive_with_sink`] to observe them.
///
/// # Arguments
///
/// * `archive_path` - Path to the root archive
/// * `scratch_root` - Existing directory that receives `extract_<n>` subdirectories
/// * `config` - Depth, ceiling and buffer limits
/// * `predicate` - Selects the entries to materialize
///
/// # Errors
///
/// Returns an error only for configuration faults, before anything is read:
/// - Invalid limits in `config`
/// - Missing or non-directory scratch root
/// - Root archive name with an unsupported or unimplemented container kind
///
/// Every later fault is reported as [`Outcome::Fail`].
///
/// # Examples
///
/// ```no_run
/// use nestarch_core::ScratchResources;
/// use nestarch_core::TraversalConfig;
/// use nestarch_core::extract_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = TraversalConfig::default().with_max_depth(2);
/// let success = extract_archive("outer.zip", "/tmp/scratch", &config, |meta| {
///     meta.file_name().ends_with(".txt")
/// })?
/// .into_success()?;
///
/// for entry in &success.entries {
///     println!("{} -> {}", entry.meta().full_path(), entry.path().display());
/// }
/// success.cleanup()?;
/// # Ok(())
/// # }
/// ```
pub fn extract_archive<P, Q, F>(
    archive_path: P,
    scratch_root: Q,
    config: &TraversalConfig,
    predicate: F,
) -> Result<Outcome<ExtractedEntry>>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    F: Fn(&EntryMeta) -> bool,
{
    extract_archive_with_sink(archive_path, scratch_root, config, predicate, &mut NoopSink)
}

/// Same as [`extract_archive`], reporting decode faults to `sink`.
///
/// # Errors
///
/// Returns an error only for configuration faults. See [`extract_archive`].
///
/// # Examples
///
/// ```no_run
/// use nestarch_core::DecodeFault;
/// use nestarch_core::TraversalConfig;
/// use nestarch_core::extract_archive_with_sink;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut faults = Vec::new();
/// let mut sink = |fault: &DecodeFault| faults.push(fault.clone());
/// let outcome = extract_archive_with_sink(
///     "outer.zip",
///     "/tmp/scratch",
///     &TraversalConfig::default(),
///     |_| true,
///     &mut sink,
/// )?;
/// println!("{} entries, {} faults", outcome.entries().len(), faults.len());
/// # Ok(())
/// # }
/// ```
pub fn extract_archive_with_sink<P, Q, F>(
    archive_path: P,
    scratch_root: Q,
    config: &TraversalConfig,
    predicate: F,
    sink: &mut dyn FaultSink,
) -> Result<Outcome<ExtractedEntry>>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    F: Fn(&EntryMeta) -> bool,
{
    traverse(
        archive_path.as_ref(),
        scratch_root.as_ref(),
        config,
        &predicate,
        sink,
    )
}

/// Lists every entry of an archive and of the nested archives the predicate
/// selects, without producing files as results.
///
/// Every discovered entry is recorded regardless of the predicate. A nested
/// archive is opened only if the predicate selects it and the depth limit
/// allows; it is copied to scratch storage for decoding, so the outcome
/// still owns scratch directories that need cleanup.
///
/// # Errors
///
/// Returns an error only for configuration faults. See [`extract_archive`].
///
/// # Examples
///
/// ```no_run
/// use nestarch_core::ScratchResources;
/// use nestarch_core::TraversalConfig;
/// use nestarch_core::peek_archive;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = TraversalConfig::default().with_max_depth(3);
/// let outcome = peek_archive("outer.zip", "/tmp/scratch", &config, |_| true)?;
/// for meta in outcome.entries() {
///     println!("{:>6} {}", meta.index(), meta.full_path());
/// }
/// outcome.cleanup()?;
/// # Ok(())
/// # }
/// ```
pub fn peek_archive<P, Q, F>(
    archive_path: P,
    scratch_root: Q,
    config: &TraversalConfig,
    predicate: F,
) -> Result<Outcome<EntryMeta>>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    F: Fn(&EntryMeta) -> bool,
{
    peek_archive_with_sink(archive_path, scratch_root, config, predicate, &mut NoopSink)
}

/// Same as [`peek_archive`], reporting decode faults to `sink`.
///
/// # Errors
///
/// Returns an error only for configuration faults. See [`extract_archive`].
pub fn peek_archive_with_sink<P, Q, F>(
    archive_path: P,
    scratch_root: Q,
    config: &TraversalConfig,
    predicate: F,
    sink: &mut dyn FaultSink,
) -> Result<Outcome<EntryMeta>>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    F: Fn(&EntryMeta) -> bool,
{
    traverse(
        archive_path.as_ref(),
        scratch_root.as_ref(),
        config,
        &predicate,
        sink,
    )
}

/// Checks the configuration, then runs one traversal with a fresh context.
fn traverse<M: TraversalMode>(
    archive_path: &Path,
    scratch_root: &Path,
    config: &TraversalConfig,
    predicate: &dyn Fn(&EntryMeta) -> bool,
    sink: &mut dyn FaultSink,
) -> Result<Outcome<M>> {
    config.validate()?;
    let scratch_root = ScratchRoot::new(scratch_root)?;
    let root_name = root_container_name(archive_path)?;

    debug!(
        archive = %archive_path.display(),
        scratch_root = %scratch_root.as_path().display(),
        max_depth = config.max_depth,
        iteration_ceiling = config.iteration_ceiling,
        "starting traversal"
    );

    let mut ctx = TraversalContext::new(config, &scratch_root, predicate, sink);
    let result = File::open(archive_path)
        .map_err(TraversalError::from)
        .and_then(|file| {
            let mut reader = BufReader::with_capacity(config.buffer_size, file);
            walk_archive(&mut ctx, ContainerInput::Seekable(&mut reader), &root_name, "", 1)
        });

    Ok(ctx.into_outcome(result))
}

/// Resolves the root archive's file name to a walkable container name.
fn root_container_name(archive_path: &Path) -> Result<String> {
    let Some(name) = archive_path.file_name() else {
        return Err(TraversalError::UnsupportedContainer {
            name: archive_path.display().to_string(),
        });
    };
    let name = name.to_string_lossy().into_owned();
    resolve_container(&name)?;
    Ok(name)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::ScratchResources;
    use crate::test_utils::sample_nested_archive;
    use tempfile::TempDir;

    #[test]
    fn test_root_container_name() {
        assert_eq!(
            root_container_name(Path::new("/data/outer.zip")).unwrap(),
            "outer.zip"
        );
        assert!(matches!(
            root_container_name(Path::new("/data/outer.7z")),
            Err(TraversalError::UnimplementedContainer { .. })
        ));
        assert!(matches!(
            root_container_name(Path::new("/data/notes.txt")),
            Err(TraversalError::UnsupportedContainer { .. })
        ));
        assert!(root_container_name(Path::new("/")).is_err());
    }

    #[test]
    fn test_invalid_config_is_configuration_fault() {
        let temp = TempDir::new().unwrap();
        let archive = sample_nested_archive().write_to(temp.path(), "test.zip");
        let config = TraversalConfig::default().with_max_depth(0);

        let err = extract_archive(&archive, temp.path(), &config, |_| true).unwrap_err();
        assert!(err.is_configuration_fault());
    }

    #[test]
    fn test_missing_archive_is_fail() {
        let temp = TempDir::new().unwrap();
        let scratch = temp.path().join("scratch");
        std::fs::create_dir(&scratch).unwrap();

        let outcome = peek_archive(
            temp.path().join("missing.zip"),
            &scratch,
            &TraversalConfig::default(),
            |_| true,
        )
        .unwrap();

        assert!(matches!(outcome.error(), Some(TraversalError::Io(_))));
        assert!(outcome.entries().is_empty());
        assert!(outcome.scratch_dirs().is_empty());
    }

    #[test]
    fn test_extract_roundtrip() {
        let temp = TempDir::new().unwrap();
        let archive = sample_nested_archive().write_to(temp.path(), "test.zip");
        let scratch = temp.path().join("scratch");
        std::fs::create_dir(&scratch).unwrap();

        let outcome =
            extract_archive(&archive, &scratch, &TraversalConfig::default(), |_| true).unwrap();

        assert!(outcome.is_success());
        assert_eq!(outcome.entries().len(), 2);
        assert!(outcome.scratch_dirs().iter().all(|d| d.starts_with(
            scratch.canonicalize().unwrap()
        )));
        outcome.cleanup().unwrap();
    }
}
