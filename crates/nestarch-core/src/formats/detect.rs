//! Container kind resolution.
//!
//! Kinds are inferred from the file-name extension only, case-sensitively.
//! There is no content sniffing.

use std::fmt;

use crate::Result;
use crate::TraversalError;

/// Known container kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// ZIP archive.
    Zip,
    /// 7z archive. Recognized, but no entry source exists for it.
    SevenZ,
}

impl ContainerKind {
    /// All recognized kinds.
    pub const ALL: [Self; 2] = [Self::Zip, Self::SevenZ];

    /// Resolves a container kind from a file name.
    ///
    /// Only the final `/`-separated segment is considered. Names without an
    /// extension resolve to `None`; a bare `.zip` is still a zip.
    ///
    /// # Examples
    ///
    /// ```
    /// use nestarch_core::ContainerKind;
    ///
    /// assert_eq!(ContainerKind::from_name("outer.zip"), Some(ContainerKind::Zip));
    /// assert_eq!(ContainerKind::from_name("dir/inner.7z"), Some(ContainerKind::SevenZ));
    /// assert_eq!(ContainerKind::from_name("OUTER.ZIP"), None);
    /// assert_eq!(ContainerKind::from_name("notes.txt"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let base = name.trim_end_matches('/').rsplit('/').next().unwrap_or(name);
        let (_, extension) = base.rsplit_once('.')?;
        Self::ALL.into_iter().find(|kind| kind.extension() == extension)
    }

    /// Returns the file-name extension for this kind.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Zip => "zip",
            Self::SevenZ => "7z",
        }
    }

    /// Returns `true` if an entry source exists for this kind.
    #[must_use]
    pub const fn is_implemented(self) -> bool {
        matches!(self, Self::Zip)
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Resolves a name to a container kind that can actually be walked.
///
/// # Errors
///
/// Returns [`TraversalError::UnsupportedContainer`] for unknown names and
/// [`TraversalError::UnimplementedContainer`] for recognized kinds without an
/// entry source.
pub fn resolve_container(name: &str) -> Result<ContainerKind> {
    match ContainerKind::from_name(name) {
        Some(kind) if kind.is_implemented() => Ok(kind),
        Some(kind) => Err(TraversalError::UnimplementedContainer {
            name: name.to_string(),
            kind,
        }),
        None => Err(TraversalError::UnsupportedContainer {
            name: name.to_string(),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_zip() {
        assert_eq!(ContainerKind::from_name("archive.zip"), Some(ContainerKind::Zip));
        assert_eq!(
            ContainerKind::from_name("f/nested_zip.zip"),
            Some(ContainerKind::Zip)
        );
    }

    #[test]
    fn test_detect_7z() {
        assert_eq!(
            ContainerKind::from_name("archive.7z"),
            Some(ContainerKind::SevenZ)
        );
    }

    #[test]
    fn test_detect_is_case_sensitive() {
        assert_eq!(ContainerKind::from_name("ARCHIVE.ZIP"), None);
        assert_eq!(ContainerKind::from_name("Archive.7Z"), None);
    }

    #[test]
    fn test_detect_unknown() {
        assert_eq!(ContainerKind::from_name("archive.rar"), None);
        assert_eq!(ContainerKind::from_name("text.txt"), None);
        assert_eq!(ContainerKind::from_name("zip"), None);
        assert_eq!(ContainerKind::from_name(""), None);
    }

    #[test]
    fn test_detect_extension_only_name() {
        assert_eq!(ContainerKind::from_name(".zip"), Some(ContainerKind::Zip));
        assert_eq!(ContainerKind::from_name("dir/.7z"), Some(ContainerKind::SevenZ));
    }

    #[test]
    fn test_detect_uses_last_segment() {
        assert_eq!(ContainerKind::from_name("a.zip/readme"), None);
        assert_eq!(ContainerKind::from_name("dir.zip/"), Some(ContainerKind::Zip));
    }

    #[test]
    fn test_resolve_container() {
        assert_eq!(resolve_container("a.zip").unwrap(), ContainerKind::Zip);
        assert!(matches!(
            resolve_container("a.7z"),
            Err(TraversalError::UnimplementedContainer {
                kind: ContainerKind::SevenZ,
                ..
            })
        ));
        assert!(matches!(
            resolve_container("a.txt"),
            Err(TraversalError::UnsupportedContainer { .. })
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(ContainerKind::Zip.to_string(), "zip");
        assert_eq!(ContainerKind::SevenZ.to_string(), "7z");
    }
}
