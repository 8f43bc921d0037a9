//! Recursive, ignore-aware manifest builder.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tokio::fs::{self, ReadDir};
use tracing::{debug, info, warn};

use projtree_core::{
    BuildError, BuildWarning, Manifest, ManifestStats, RefMode, RefSpec, TreeEntry,
    normalize_rel_path,
};

use crate::reachability::{Reachability, ReachabilityChecker};
use crate::rules::IgnoreRules;

/// Walks a scan root one entry at a time and assembles the manifest.
///
/// Every input that shapes the output is held here and never changes
/// during the walk: the root every path is relative to, the rule set,
/// the reference, and the effective mode.
pub struct TreeBuilder<'a> {
    root: PathBuf,
    rules: &'a IgnoreRules,
    refspec: &'a RefSpec,
    mode: RefMode,
    checker: &'a dyn ReachabilityChecker,
    skipped: Vec<String>,
}

/// Mutable bookkeeping threaded through the recursion.
#[derive(Default)]
struct WalkState {
    stats: ManifestStats,
    warnings: Vec<BuildWarning>,
}

impl<'a> TreeBuilder<'a> {
    /// Create a builder. `checker` is only consulted in [`RefMode::HashLike`].
    pub fn new(
        root: impl Into<PathBuf>,
        rules: &'a IgnoreRules,
        refspec: &'a RefSpec,
        mode: RefMode,
        checker: &'a dyn ReachabilityChecker,
    ) -> Self {
        Self {
            root: root.into(),
            rules,
            refspec,
            mode,
            checker,
            skipped: Vec::new(),
        }
    }

    /// Leave out one exact root-relative path, e.g. the manifest file itself.
    ///
    /// `\` separators and `.` components are normalized away first.
    pub fn skip(mut self, rel_path: impl AsRef<str>) -> Self {
        let rel_path = rel_path.as_ref().replace('\\', "/");
        self.skipped.push(normalize_rel_path(Path::new(&rel_path)));
        self
    }

    /// Walk the root and return the manifest.
    ///
    /// Only an unusable root is fatal. Unreadable subdirectories and files
    /// that cannot be stat'ed are skipped and reported as warnings.
    pub async fn build(&self) -> Result<Manifest, BuildError> {
        let start = Instant::now();
        let root = fs::canonicalize(&self.root)
            .await
            .map_err(|e| BuildError::io(&self.root, e))?;

        let metadata = fs::metadata(&root)
            .await
            .map_err(|e| BuildError::io(&root, e))?;
        if !metadata.is_dir() {
            return Err(BuildError::NotADirectory { path: root });
        }

        let read_dir = fs::read_dir(&root)
            .await
            .map_err(|e| BuildError::io(&root, e))?;

        info!("Building manifest for {} in {} mode", root.display(), self.mode);

        let mut state = WalkState::default();
        let entries = self.walk_dir(&root, &root, read_dir, &mut state).await;

        Ok(Manifest {
            entries,
            refspec: self.refspec.clone(),
            mode: self.mode,
            stats: state.stats,
            warnings: state.warnings,
            duration: start.elapsed(),
        })
    }

    /// Resolve the children of `dir` in listing order.
    async fn walk_dir(
        &self,
        root: &Path,
        dir: &Path,
        mut read_dir: ReadDir,
        state: &mut WalkState,
    ) -> Vec<TreeEntry> {
        let mut results = Vec::new();

        loop {
            let entry = match read_dir.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(err) => {
                    warn!("Stopped listing {}: {err}", dir.display());
                    state.warnings.push(BuildWarning::read_error(dir, &err));
                    break;
                }
            };

            let path = entry.path();
            let rel_path = match path.strip_prefix(root) {
                Ok(rel) => normalize_rel_path(rel),
                Err(_) => continue,
            };

            let is_dir = match entry.file_type().await {
                Ok(file_type) => file_type.is_dir(),
                Err(err) => {
                    // Without a file type, only file rules can apply.
                    if self.is_left_out(&rel_path, false) {
                        debug!("DROP ignored: {rel_path}");
                        state.stats.record_ignored();
                    } else {
                        warn!("Skipping {rel_path}: {err}");
                        state.warnings.push(BuildWarning::metadata_error(&path, &err));
                    }
                    continue;
                }
            };

            if self.is_left_out(&rel_path, is_dir) {
                debug!("DROP ignored: {rel_path}");
                state.stats.record_ignored();
                continue;
            }
            debug!("KEEP not ignored: {rel_path}");

            let name = entry.file_name().to_string_lossy().into_owned();

            if is_dir {
                let sub_dir = match fs::read_dir(&path).await {
                    Ok(sub_dir) => sub_dir,
                    Err(err) => {
                        warn!("Skipping unreadable directory {rel_path}: {err}");
                        state.warnings.push(BuildWarning::read_error(&path, &err));
                        continue;
                    }
                };

                let children = Box::pin(self.walk_dir(root, &path, sub_dir, state)).await;
                if children.is_empty() {
                    debug!("PRUNE empty directory: {rel_path}");
                    state.stats.record_pruned();
                    continue;
                }

                state.stats.record_dir();
                results.push(TreeEntry::new_directory(name, rel_path, children));
            } else if let Some(file) = self.resolve_file(&path, name, rel_path, state).await {
                results.push(file);
            }
        }

        results
    }

    fn is_left_out(&self, rel_path: &str, is_dir: bool) -> bool {
        self.skipped.iter().any(|skipped| skipped == rel_path)
            || self.rules.is_excluded(rel_path, is_dir)
    }

    /// Stat, link and (in hash mode) verify a single file.
    async fn resolve_file(
        &self,
        path: &Path,
        name: String,
        rel_path: String,
        state: &mut WalkState,
    ) -> Option<TreeEntry> {
        let size = match fs::metadata(path).await {
            Ok(metadata) => metadata.len(),
            Err(err) => {
                warn!("Skipping {rel_path}, stat failed: {err}");
                state.warnings.push(BuildWarning::metadata_error(path, &err));
                return None;
            }
        };

        let remote_url = self.refspec.file_url(self.mode, &rel_path);

        if self.mode.is_hash() {
            match self.checker.check(&remote_url).await {
                Reachability::Reachable { status } => {
                    debug!("STATUS {status}: {remote_url} <- {}", path.display());
                }
                Reachability::Unreachable(reason) => {
                    info!("DROP unreachable ({reason}): {rel_path}");
                    state.stats.record_unreachable();
                    state
                        .warnings
                        .push(BuildWarning::unreachable(&rel_path, &remote_url));
                    return None;
                }
            }
        }

        state.stats.record_file(size);
        Some(TreeEntry::new_file(name, rel_path, size, remote_url))
    }
}
