//! Traversal limits.

use crate::Result;
use crate::TraversalError;

/// Limits for one nested-archive traversal.
///
/// # Examples
///
/// ```
/// use nestarch_core::TraversalConfig;
///
/// // Walk the root archive only
/// let config = TraversalConfig::default();
/// assert_eq!(config.max_depth, 1);
///
/// // Descend two levels, stop after 500 entries
/// let custom = TraversalConfig::default()
///     .with_max_depth(3)
///     .with_iteration_ceiling(500);
/// assert!(custom.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalConfig {
    /// Maximum nesting depth. The root archive's direct entries are at
    /// depth 1; a nested container is only opened while its depth is below
    /// this value.
    pub max_depth: usize,

    /// Hard cap on entries discovered across all nesting levels.
    ///
    /// Protects against self-referencing archives and explosive fan-out.
    /// Hitting it truncates the walk and marks the result incomplete.
    pub iteration_ceiling: usize,

    /// Buffer size in bytes for reading archives and writing scratch files.
    pub buffer_size: usize,
}

impl Default for TraversalConfig {
    /// Default values:
    /// - `max_depth`: 1 (no descent into nested containers)
    /// - `iteration_ceiling`: 10,000
    /// - `buffer_size`: 16 KB
    fn default() -> Self {
        Self {
            max_depth: 1,
            iteration_ceiling: 10_000,
            buffer_size: 16 * 1024,
        }
    }
}

impl TraversalConfig {
    /// Sets the maximum nesting depth.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the iteration ceiling.
    #[must_use]
    pub fn with_iteration_ceiling(mut self, iteration_ceiling: usize) -> Self {
        self.iteration_ceiling = iteration_ceiling;
        self
    }

    /// Sets the I/O buffer size.
    #[must_use]
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    /// Checks that the limits describe a walk that can start.
    ///
    /// An iteration ceiling of 0 is valid: it yields an empty, incomplete
    /// result.
    ///
    /// # Errors
    ///
    /// Returns [`TraversalError::InvalidConfig`] if `max_depth` or
    /// `buffer_size` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(TraversalError::InvalidConfig {
                reason: "max_depth must be at least 1".to_string(),
            });
        }
        if self.buffer_size == 0 {
            return Err(TraversalError::InvalidConfig {
                reason: "buffer_size must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}
