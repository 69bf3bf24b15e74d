//! Error types for nested archive traversal.
//!
//! Two classes of fault exist and they never mix:
//!
//! - [`TraversalError`] is fatal. It is either returned before a traversal
//!   starts (configuration faults) or captured into an
//!   [`Outcome::Fail`](crate::Outcome::Fail) once the walk is under way.
//! - [`DecodeFault`] is recoverable. It is handed to a
//!   [`FaultSink`](crate::FaultSink) and the walk carries on.

use std::path::PathBuf;
use thiserror::Error;

use crate::formats::detect::ContainerKind;

/// Result type alias using `TraversalError`.
pub type Result<T> = std::result::Result<T, TraversalError>;

/// Fatal errors raised while configuring or walking an archive tree.
#[derive(Error, Debug)]
pub enum TraversalError {
    /// I/O operation failed while reading an archive or materializing an
    /// entry.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The scratch root is missing, not a directory, or cannot be resolved.
    #[error("invalid scratch root {path}: {reason}")]
    InvalidScratchRoot {
        /// The rejected scratch root.
        path: PathBuf,
        /// Why it was rejected.
        reason: String,
    },

    /// Traversal limits are out of range.
    #[error("invalid traversal configuration: {reason}")]
    InvalidConfig {
        /// Description of the offending setting.
        reason: String,
    },

    /// The name does not map to any known container kind.
    #[error("unsupported container: {name}")]
    UnsupportedContainer {
        /// Name of the archive or entry that was dispatched.
        name: String,
    },

    /// The container kind is recognized but has no entry source.
    #[error("container kind {kind} is not implemented: {name}")]
    UnimplementedContainer {
        /// Name of the archive or entry that was dispatched.
        name: String,
        /// The recognized kind.
        kind: ContainerKind,
    },
}

impl TraversalError {
    /// Returns `true` if this error is raised before any traversal begins.
    ///
    /// Configuration faults are never retried and never produce partial
    /// results.
    ///
    /// # Examples
    ///
    /// ```
    /// use nestarch_core::TraversalError;
    ///
    /// let err = TraversalError::InvalidConfig {
    ///     reason: "max_depth must be at least 1".into(),
    /// };
    /// assert!(err.is_configuration_fault());
    ///
    /// let err = TraversalError::Io(std::io::Error::other("disk full"));
    /// assert!(!err.is_configuration_fault());
    /// ```
    #[must_use]
    pub const fn is_configuration_fault(&self) -> bool {
        matches!(
            self,
            Self::InvalidScratchRoot { .. } | Self::InvalidConfig { .. }
        )
    }

    /// Returns the name of the container involved, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use nestarch_core::TraversalError;
    ///
    /// let err = TraversalError::UnsupportedContainer {
    ///     name: "notes.txt".into(),
    /// };
    /// assert_eq!(err.context(), Some("notes.txt"));
    /// ```
    #[must_use]
    pub fn context(&self) -> Option<&str> {
        match self {
            Self::UnsupportedContainer { name } | Self::UnimplementedContainer { name, .. } => {
                Some(name)
            }
            Self::InvalidConfig { reason } | Self::InvalidScratchRoot { reason, .. } => {
                Some(reason)
            }
            Self::Io(_) => None,
        }
    }
}

/// A recoverable failure to decode one entry header.
///
/// Delivered to a [`FaultSink`](crate::FaultSink); the entry source then
/// retries with the next physical entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to decode entry in {container} (attempt {attempt}): {reason}")]
pub struct DecodeFault {
    /// Name of the container being decoded.
    pub container: String,
    /// Consecutive fault count for the current entry, starting at 1.
    pub attempt: usize,
    /// Decoder message.
    pub reason: String,
}

impl DecodeFault {
    /// Creates a new decode fault.
    #[must_use]
    pub fn new(container: impl Into<String>, attempt: usize, reason: impl Into<String>) -> Self {
        Self {
            container: container.into(),
            attempt,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TraversalError::UnsupportedContainer {
            name: "notes.txt".into(),
        };
        assert_eq!(err.to_string(), "unsupported container: notes.txt");
    }

    #[test]
    fn test_unimplemented_container_display() {
        let err = TraversalError::UnimplementedContainer {
            name: "inner.7z".into(),
            kind: ContainerKind::SevenZ,
        };
        let display = err.to_string();
        assert!(display.contains("7z"));
        assert!(display.contains("inner.7z"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: TraversalError = io_err.into();
        assert!(matches!(err, TraversalError::Io(_)));
    }

    #[test]
    fn test_is_configuration_fault() {
        let err = TraversalError::InvalidScratchRoot {
            path: PathBuf::from("/missing"),
            reason: "does not exist".into(),
        };
        assert!(err.is_configuration_fault());

        let err = TraversalError::InvalidConfig {
            reason: "bad".into(),
        };
        assert!(err.is_configuration_fault());

        let err = TraversalError::UnsupportedContainer {
            name: "a.rar".into(),
        };
        assert!(!err.is_configuration_fault());

        let err = TraversalError::Io(std::io::Error::other("boom"));
        assert!(!err.is_configuration_fault());
    }

    #[test]
    fn test_context() {
        let err = TraversalError::UnimplementedContainer {
            name: "x.7z".into(),
            kind: ContainerKind::SevenZ,
        };
        assert_eq!(err.context(), Some("x.7z"));

        let err = TraversalError::Io(std::io::Error::other("boom"));
        assert_eq!(err.context(), None);
    }

    #[test]
    fn test_decode_fault_display() {
        let fault = DecodeFault::new("outer.zip", 3, "Invalid local file header");
        let display = fault.to_string();
        assert!(display.contains("outer.zip"));
        assert!(display.contains("attempt 3"));
        assert!(display.contains("Invalid local file header"));
    }
}
