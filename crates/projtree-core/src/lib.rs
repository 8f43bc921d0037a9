//! Core types for projtree.
//!
//! This crate provides the fundamental data structures shared by the scan
//! and confirmation crates: tree entries, parsed GitHub references, build
//! configuration, and the manifest container.

mod config;
mod entry;
mod error;
mod manifest;
mod refspec;

pub use config::{BuildConfig, BuildConfigBuilder, DEFAULT_IGNORE_FILES, DEFAULT_OUTPUT_FILE};
pub use entry::{EntryKind, TreeEntry};
pub use error::{BuildError, BuildWarning, WarningKind};
pub use manifest::{Manifest, ManifestStats};
pub use refspec::{RAW_HOST, RefMode, RefSpec, normalize_rel_path};
