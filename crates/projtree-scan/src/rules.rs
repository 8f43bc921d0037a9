//! Gitignore-style exclusion rules loaded from the scan root.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use tokio::fs;
use tracing::{debug, info, warn};

use projtree_core::{BuildWarning, WarningKind};

/// Combined rule set from every loaded rule file.
///
/// Files are added in order, so later files (and later lines) win under
/// normal gitignore precedence, negations included.
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    matcher: Gitignore,
    sources: Vec<PathBuf>,
}

impl IgnoreRules {
    /// A rule set that excludes nothing.
    pub fn empty() -> Self {
        Self {
            matcher: Gitignore::empty(),
            sources: Vec::new(),
        }
    }

    /// Load rule files rooted at `root`.
    ///
    /// Missing files are skipped. Files that exist but cannot be read are
    /// skipped too and reported in the returned warnings.
    pub async fn load<P: AsRef<Path>>(root: &Path, rule_files: &[P]) -> (Self, Vec<BuildWarning>) {
        let mut builder = GitignoreBuilder::new(root);
        let mut sources = Vec::new();
        let mut warnings = Vec::new();

        for file in rule_files {
            let file = file.as_ref();
            let content = match fs::read_to_string(file).await {
                Ok(content) => content,
                Err(err) if err.kind() == ErrorKind::NotFound => {
                    info!("Rule file not found, skipping: {}", file.display());
                    continue;
                }
                Err(err) => {
                    warn!("Could not read rule file {}: {err}", file.display());
                    warnings.push(BuildWarning::new(
                        file,
                        format!("Unreadable rule file: {err}"),
                        WarningKind::IgnoreFileUnreadable,
                    ));
                    continue;
                }
            };

            if content.trim().is_empty() {
                warn!("{} is empty - nothing will be ignored", file.display());
                continue;
            }

            add_lines(&mut builder, Some(file), content.lines());
            sources.push(file.to_path_buf());
            info!("Loaded rule file {}", file.display());
        }

        (
            Self {
                matcher: finish(builder),
                sources,
            },
            warnings,
        )
    }

    /// Build a rule set from in-memory lines.
    pub fn from_lines<'a>(root: &Path, lines: impl IntoIterator<Item = &'a str>) -> Self {
        let mut builder = GitignoreBuilder::new(root);
        add_lines(&mut builder, None, lines);
        Self {
            matcher: finish(builder),
            sources: Vec::new(),
        }
    }

    /// Whether `rel_path` (relative to the scan root) is excluded.
    ///
    /// `\` separators are normalized to `/` first. A path is also excluded
    /// when one of its parent directories is.
    pub fn is_excluded(&self, rel_path: &str, is_dir: bool) -> bool {
        let normalized = rel_path.replace('\\', "/");
        let normalized = normalized.trim_start_matches("./");
        if normalized.is_empty() {
            return false;
        }
        self.matcher
            .matched_path_or_any_parents(Path::new(normalized), is_dir)
            .is_ignore()
    }

    /// Rule files that contributed at least one line.
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    /// Number of parsed rules.
    pub fn len(&self) -> usize {
        self.matcher.num_ignores() as usize + self.matcher.num_whitelists() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for IgnoreRules {
    fn default() -> Self {
        Self::empty()
    }
}

fn add_lines<'a>(
    builder: &mut GitignoreBuilder,
    source: Option<&Path>,
    lines: impl IntoIterator<Item = &'a str>,
) {
    for line in lines {
        if let Err(err) = builder.add_line(source.map(Path::to_path_buf), line) {
            warn!("Skipping invalid ignore rule '{line}': {err}");
        }
    }
}

fn finish(builder: GitignoreBuilder) -> Gitignore {
    match builder.build() {
        Ok(matcher) => {
            debug!(
                "Compiled {} ignore rules ({} negations)",
                matcher.num_ignores(),
                matcher.num_whitelists()
            );
            matcher
        }
        Err(err) => {
            warn!("Could not compile ignore rules, nothing will be ignored: {err}");
            Gitignore::empty()
        }
    }
}
