//! GitHub reference parsing and raw URL construction.

use std::fmt;
use std::path::{Component, Path};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BuildError;

/// Host serving raw file contents.
pub const RAW_HOST: &str = "raw.githubusercontent.com";

/// How the `ref` part of a [`RefSpec`] is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RefMode {
    /// Commit hash. Every file is verified against the remote.
    HashLike,
    /// Branch name. URLs are emitted unverified.
    BranchLike,
}

impl RefMode {
    pub fn is_hash(self) -> bool {
        self == Self::HashLike
    }
}

impl fmt::Display for RefMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HashLike => f.write_str("commit hash"),
            Self::BranchLike => f.write_str("branch"),
        }
    }
}

/// A parsed `<owner>/<repo>/<ref>` reference.
///
/// `git_ref` may itself contain `/` (e.g. `feature/sub/path`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RefSpec {
    pub owner: String,
    pub repo: String,
    pub git_ref: String,
}

impl RefSpec {
    /// Split `input` on `/` into owner, repo and the rejoined remainder.
    ///
    /// Fails with fewer than three segments or when any of the three parts
    /// is empty. No default ref is substituted.
    pub fn parse(input: &str) -> Result<Self, BuildError> {
        let invalid = || BuildError::InvalidRef {
            input: input.to_string(),
        };

        let mut parts = input.split('/');
        let owner = parts.next().ok_or_else(invalid)?;
        let repo = parts.next().ok_or_else(invalid)?;
        let git_ref = parts.collect::<Vec<_>>().join("/");

        if owner.is_empty() || repo.is_empty() || git_ref.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
            git_ref,
        })
    }

    /// Guess the mode from the shape of the ref: exactly 40 hex characters
    /// looks like a commit hash, anything else like a branch.
    pub fn classify(&self) -> RefMode {
        if self.git_ref.len() == 40 && self.git_ref.chars().all(|c| c.is_ascii_hexdigit()) {
            RefMode::HashLike
        } else {
            RefMode::BranchLike
        }
    }

    /// Raw content URL of `rel_path` under this reference.
    pub fn file_url(&self, mode: RefMode, rel_path: &str) -> String {
        match mode {
            RefMode::HashLike => format!(
                "https://{RAW_HOST}/{}/{}/{}/{rel_path}",
                self.owner, self.repo, self.git_ref
            ),
            RefMode::BranchLike => format!(
                "https://{RAW_HOST}/{}/{}/refs/heads/{}/{rel_path}",
                self.owner, self.repo, self.git_ref
            ),
        }
    }
}

impl FromStr for RefSpec {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RefSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.owner, self.repo, self.git_ref)
    }
}

/// Render a root-relative path with `/` separators regardless of platform.
///
/// `.` components are dropped, so `./a.txt` and `a.txt` render the same.
pub fn normalize_rel_path(path: &Path) -> String {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
        .replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;

    const HASH: &str = "0123456789abcdef0123456789abcdef01234567";

    #[test]
    fn test_parse_simple() {
        let spec = RefSpec::parse("owner/repo/main").unwrap();
        assert_eq!(spec.owner, "owner");
        assert_eq!(spec.repo, "repo");
        assert_eq!(spec.git_ref, "main");
    }

    #[test]
    fn test_parse_nested_ref() {
        let spec: RefSpec = "owner/repo/feature/sub/path".parse().unwrap();
        assert_eq!(spec.git_ref, "feature/sub/path");
        assert_eq!(spec.to_string(), "owner/repo/feature/sub/path");
    }

    #[test]
    fn test_parse_rejects_short_input() {
        assert!(matches!(
            RefSpec::parse("owner/repo"),
            Err(BuildError::InvalidRef { .. })
        ));
        assert!(RefSpec::parse("owner").is_err());
        assert!(RefSpec::parse("").is_err());
        assert!(RefSpec::parse("owner/repo/").is_err());
        assert!(RefSpec::parse("/repo/main").is_err());
    }

    #[test]
    fn test_classify() {
        let hash = RefSpec::parse(&format!("u/r/{HASH}")).unwrap();
        assert_eq!(hash.classify(), RefMode::HashLike);

        let upper = RefSpec::parse(&format!("u/r/{}", HASH.to_uppercase())).unwrap();
        assert_eq!(upper.classify(), RefMode::HashLike);

        let short = RefSpec::parse(&format!("u/r/{}", &HASH[..39])).unwrap();
        assert_eq!(short.classify(), RefMode::BranchLike);

        let branch = RefSpec::parse("u/r/main").unwrap();
        assert_eq!(branch.classify(), RefMode::BranchLike);
    }

    #[test]
    fn test_branch_url() {
        let spec = RefSpec::parse("u/r/main").unwrap();
        assert_eq!(
            spec.file_url(RefMode::BranchLike, "src/a.js"),
            "https://raw.githubusercontent.com/u/r/refs/heads/main/src/a.js"
        );
    }

    #[test]
    fn test_hash_url() {
        let spec = RefSpec::parse(&format!("u/r/{HASH}")).unwrap();
        assert_eq!(
            spec.file_url(RefMode::HashLike, "src/a.js"),
            format!("https://raw.githubusercontent.com/u/r/{HASH}/src/a.js")
        );
    }

    #[test]
    fn test_normalize_rel_path() {
        assert_eq!(normalize_rel_path(Path::new("src/lib/a.rs")), "src/lib/a.rs");
        assert_eq!(normalize_rel_path(Path::new("a.txt")), "a.txt");
        assert_eq!(normalize_rel_path(Path::new("./out.json")), "out.json");
        assert_eq!(normalize_rel_path(Path::new("docs/./a.md")), "docs/a.md");
    }
}
