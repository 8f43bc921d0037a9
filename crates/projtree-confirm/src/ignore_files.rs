//! Bootstrapping of missing ignore rule files.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::ConfirmError;

const GITIGNORE_DEFAULTS: &[&str] = &["node_modules/"];

const PTIGNORE_DEFAULTS: &[&str] = &[
    "lib/",
    "test-fixtures/",
    "**/*.log",
    ".git",
    ".DS_Store",
    "Thumbs.db",
];

/// What to write into a missing rule file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreFileChoice {
    /// Starter rules for the file type.
    DefaultContent,
    /// An empty file.
    Empty,
}

/// A rule file to create and what goes into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreFileDecision {
    pub path: PathBuf,
    pub choice: IgnoreFileChoice,
}

/// Starter rules for a rule file, keyed by its file name.
pub fn default_content(path: &Path) -> &'static [&'static str] {
    match path.file_name().and_then(|n| n.to_str()) {
        Some(".gitignore") => GITIGNORE_DEFAULTS,
        Some(".ptignore") => PTIGNORE_DEFAULTS,
        _ => &[],
    }
}

/// The subset of `paths` that does not exist yet, in order.
pub fn missing_rule_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    paths.iter().filter(|p| !p.exists()).cloned().collect()
}

/// Write every decided rule file. The first failure stops the run.
pub fn materialize(decisions: &[IgnoreFileDecision]) -> Result<(), ConfirmError> {
    for decision in decisions {
        let data = match decision.choice {
            IgnoreFileChoice::DefaultContent => default_content(&decision.path).join("\n"),
            IgnoreFileChoice::Empty => String::new(),
        };

        std::fs::write(&decision.path, data).map_err(|source| ConfirmError::CreateIgnoreFile {
            path: decision.path.clone(),
            source,
        })?;

        match decision.choice {
            IgnoreFileChoice::DefaultContent => {
                info!("Created {} with the basic ignore content", decision.path.display())
            }
            IgnoreFileChoice::Empty => {
                info!("Created {} without content", decision.path.display())
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_content_by_name() {
        assert_eq!(default_content(Path::new("/r/.gitignore")), ["node_modules/"]);
        assert_eq!(default_content(Path::new("/r/.ptignore")).len(), 6);
        assert!(default_content(Path::new("/r/.dockerignore")).is_empty());
    }

    #[test]
    fn test_materialize_writes_files() {
        let temp = TempDir::new().unwrap();
        let git = temp.path().join(".gitignore");
        let pt = temp.path().join(".ptignore");

        materialize(&[
            IgnoreFileDecision {
                path: git.clone(),
                choice: IgnoreFileChoice::DefaultContent,
            },
            IgnoreFileDecision {
                path: pt.clone(),
                choice: IgnoreFileChoice::Empty,
            },
        ])
        .unwrap();

        assert_eq!(fs::read_to_string(&git).unwrap(), "node_modules/");
        assert_eq!(fs::read_to_string(&pt).unwrap(), "");
        assert!(missing_rule_files(&[git, pt]).is_empty());
    }

    #[test]
    fn test_materialize_reports_failure() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("no-such-dir").join(".ptignore");

        let err = materialize(&[IgnoreFileDecision {
            path,
            choice: IgnoreFileChoice::DefaultContent,
        }])
        .unwrap_err();
        assert!(matches!(err, ConfirmError::CreateIgnoreFile { .. }));
    }
}
