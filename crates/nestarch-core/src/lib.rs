//! Depth-bounded, loop-protected traversal of archives nested in archives.
//!
//! `nestarch-core` walks a root archive entry by entry and, when an entry is
//! itself an archive, descends into it. Two modes share one walk:
//!
//! - **Extract** materializes the entries a predicate selects into one
//!   scratch subdirectory each.
//! - **Peek** records metadata for every entry and opens only the nested
//!   archives the predicate selects.
//!
//! Every walk is bounded by a maximum nesting depth and by an iteration
//! ceiling on the total number of entries, which defends against archives
//! that contain themselves or fan out explosively. The result is an
//! [`Outcome`] that owns every scratch directory created on the way until
//! [`ScratchResources::cleanup`] is called.
//!
//! # Examples
//!
//! ```no_run
//! use nestarch_core::ScratchResources;
//! use nestarch_core::TraversalConfig;
//! use nestarch_core::extract_archive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = TraversalConfig::default().with_max_depth(2);
//! let outcome = extract_archive("outer.zip", "/tmp/scratch", &config, |_| true)?;
//! println!(
//!     "Extracted {} entries (complete: {})",
//!     outcome.entries().len(),
//!     outcome.fully_read()
//! );
//! outcome.cleanup()?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod archive;
pub mod config;
pub mod copy;
pub mod error;
pub mod formats;
pub mod outcome;
pub mod sink;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub(crate) mod traversal;
pub mod types;

// Re-export main API types
pub use api::extract_archive;
pub use api::extract_archive_with_sink;
pub use api::peek_archive;
pub use api::peek_archive_with_sink;
pub use archive::Archive;
pub use archive::ArchiveBuilder;
pub use config::TraversalConfig;
pub use error::DecodeFault;
pub use error::Result;
pub use error::TraversalError;
pub use formats::ContainerKind;
pub use outcome::Fail;
pub use outcome::Outcome;
pub use outcome::ScratchResources;
pub use outcome::Success;
pub use sink::FaultSink;
pub use sink::NoopSink;

// Re-export types module for easier access
pub use types::EntryMeta;
pub use types::ExtractedEntry;
pub use types::ScratchRoot;
