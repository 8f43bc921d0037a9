//! Manifest entry types.

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Type of manifest entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// Regular file (or anything that is not a directory).
    File,
    /// Directory.
    Directory,
}

/// A single retained file or directory.
///
/// Serialized with a `"type"` tag so the manifest reads as
/// `{"type": "file", "name": ..., "path": ..., "size": ..., "githubRaw": ...}`
/// or `{"type": "directory", "name": ..., "path": ..., "children": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TreeEntry {
    /// A file with its size and raw content URL.
    File {
        /// Base name.
        name: CompactString,
        /// Path relative to the scan root, `/`-separated.
        path: String,
        /// Size in bytes.
        size: u64,
        /// Raw content URL on the remote host.
        #[serde(rename = "githubRaw")]
        remote_url: String,
    },
    /// A non-empty directory.
    Directory {
        /// Base name.
        name: CompactString,
        /// Path relative to the scan root, `/`-separated.
        path: String,
        /// Retained children in directory-listing order.
        children: Vec<TreeEntry>,
    },
}

impl TreeEntry {
    /// Create a file entry.
    pub fn new_file(
        name: impl Into<CompactString>,
        path: impl Into<String>,
        size: u64,
        remote_url: impl Into<String>,
    ) -> Self {
        Self::File {
            name: name.into(),
            path: path.into(),
            size,
            remote_url: remote_url.into(),
        }
    }

    /// Create a directory entry.
    pub fn new_directory(
        name: impl Into<CompactString>,
        path: impl Into<String>,
        children: Vec<TreeEntry>,
    ) -> Self {
        Self::Directory {
            name: name.into(),
            path: path.into(),
            children,
        }
    }

    pub fn kind(&self) -> EntryKind {
        match self {
            Self::File { .. } => EntryKind::File,
            Self::Directory { .. } => EntryKind::Directory,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::File { name, .. } | Self::Directory { name, .. } => name.as_str(),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Self::File { path, .. } | Self::Directory { path, .. } => path.as_str(),
        }
    }

    /// Size in bytes, files only.
    pub fn size(&self) -> Option<u64> {
        match self {
            Self::File { size, .. } => Some(*size),
            Self::Directory { .. } => None,
        }
    }

    /// Raw content URL, files only.
    pub fn remote_url(&self) -> Option<&str> {
        match self {
            Self::File { remote_url, .. } => Some(remote_url.as_str()),
            Self::Directory { .. } => None,
        }
    }

    /// Children, directories only.
    pub fn children(&self) -> Option<&[TreeEntry]> {
        match self {
            Self::File { .. } => None,
            Self::Directory { children, .. } => Some(children.as_slice()),
        }
    }

    /// Number of files in this subtree (1 for a file).
    pub fn file_count(&self) -> u64 {
        match self {
            Self::File { .. } => 1,
            Self::Directory { children, .. } => children.iter().map(Self::file_count).sum(),
        }
    }

    /// Total bytes in this subtree.
    pub fn total_size(&self) -> u64 {
        match self {
            Self::File { size, .. } => *size,
            Self::Directory { children, .. } => children.iter().map(Self::total_size).sum(),
        }
    }

    /// Find an entry in this subtree by its relative path.
    pub fn find(&self, rel_path: &str) -> Option<&TreeEntry> {
        if self.path() == rel_path {
            return Some(self);
        }
        self.children()?.iter().find_map(|child| child.find(rel_path))
    }
}
