//! Manifest container and statistics.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::entry::TreeEntry;
use crate::error::BuildWarning;
use crate::refspec::{RefMode, RefSpec};

/// Summary statistics for one build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestStats {
    /// Files emitted.
    pub files: u64,
    /// Directories emitted.
    pub dirs: u64,
    /// Bytes across all emitted files.
    pub total_size: u64,
    /// Entries dropped by an ignore rule.
    pub ignored: u64,
    /// Files dropped because their raw URL did not resolve.
    pub unreachable: u64,
    /// Directories dropped because nothing inside them survived.
    pub pruned_dirs: u64,
}

impl ManifestStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an emitted file.
    pub fn record_file(&mut self, size: u64) {
        self.files += 1;
        self.total_size += size;
    }

    /// Record an emitted directory.
    pub fn record_dir(&mut self) {
        self.dirs += 1;
    }

    pub fn record_ignored(&mut self) {
        self.ignored += 1;
    }

    pub fn record_unreachable(&mut self) {
        self.unreachable += 1;
    }

    pub fn record_pruned(&mut self) {
        self.pruned_dirs += 1;
    }
}

/// Result of one build: the top-level entries plus what happened on the way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Top-level entries of the scan root.
    pub entries: Vec<TreeEntry>,

    /// Reference the URLs were built from.
    pub refspec: RefSpec,

    /// Mode the build ran in.
    pub mode: RefMode,

    /// Summary statistics.
    pub stats: ManifestStats,

    /// Warnings encountered during the walk.
    pub warnings: Vec<BuildWarning>,

    /// Duration of the walk.
    pub duration: Duration,
}

impl Manifest {
    /// Pretty-printed JSON of the top-level entries, as written to disk.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.entries)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if there were any warnings during the walk.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
