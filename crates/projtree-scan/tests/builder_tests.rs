use projtree_scan::{
    BoxFuture, BuildConfig, IgnoreRules, Reachability, ReachabilityChecker, RefMode, RefSpec,
    TreeBuilder, TreeEntry, UnreachableReason,
};
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

const HASH: &str = "a94a8fe5ccb19ba61c4c0873d391e987982fbbd3";

/// Counts calls and answers the same way every time.
struct FixedChecker {
    reachable: bool,
    calls: AtomicUsize,
}

impl FixedChecker {
    fn new(reachable: bool) -> Self {
        Self {
            reachable,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ReachabilityChecker for FixedChecker {
    fn check<'a>(&'a self, _url: &'a str) -> BoxFuture<'a, Reachability> {
        Box::pin(async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.reachable {
                Reachability::Reachable { status: 200 }
            } else {
                Reachability::Unreachable(UnreachableReason::Transport("offline".to_string()))
            }
        })
    }
}

async fn load_rules(root: &std::path::Path) -> IgnoreRules {
    let config = BuildConfig::new(root);
    let (rules, warnings) = IgnoreRules::load(root, &config.ignore_paths()).await;
    assert!(warnings.is_empty());
    rules
}

fn all_paths(entries: &[TreeEntry], out: &mut Vec<String>) {
    for entry in entries {
        out.push(entry.path().to_string());
        if let Some(children) = entry.children() {
            all_paths(children, out);
        }
    }
}

#[tokio::test]
async fn test_single_ignored_file_yields_empty_manifest() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::write(root.join("a.txt"), "a").unwrap();
    fs::write(root.join(".ptignore"), "a.txt\n").unwrap();

    let rules = load_rules(root).await;
    let spec = RefSpec::parse("u/r/main").unwrap();
    let checker = FixedChecker::new(true);

    let manifest = TreeBuilder::new(root, &rules, &spec, RefMode::BranchLike, &checker)
        .skip(".ptignore")
        .build()
        .await
        .unwrap();

    assert!(manifest.is_empty());
    assert_eq!(manifest.to_json().unwrap(), "[]");
}

#[tokio::test]
async fn test_directory_with_only_ignored_content_is_absent() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir(root.join("dir")).unwrap();
    fs::write(root.join("dir/only-ignored.txt"), "x").unwrap();
    fs::write(root.join("keep.txt"), "k").unwrap();
    fs::write(root.join(".gitignore"), "only-ignored.txt\n").unwrap();

    let rules = load_rules(root).await;
    let spec = RefSpec::parse("u/r/main").unwrap();
    let checker = FixedChecker::new(true);

    let manifest = TreeBuilder::new(root, &rules, &spec, RefMode::BranchLike, &checker)
        .skip(".gitignore")
        .build()
        .await
        .unwrap();

    let mut paths = Vec::new();
    all_paths(&manifest.entries, &mut paths);
    assert_eq!(paths, vec!["keep.txt"]);
    assert_eq!(manifest.stats.pruned_dirs, 1);
}

#[tokio::test]
async fn test_chain_of_empty_ancestors_is_pruned() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("a/b/c")).unwrap();
    fs::write(root.join("a/b/c/debug.log"), "log").unwrap();
    fs::write(root.join("main.rs"), "fn main() {}").unwrap();

    let rules = IgnoreRules::from_lines(root, ["*.log"]);
    let spec = RefSpec::parse("u/r/main").unwrap();
    let checker = FixedChecker::new(true);

    let manifest = TreeBuilder::new(root, &rules, &spec, RefMode::BranchLike, &checker)
        .build()
        .await
        .unwrap();

    let mut paths = Vec::new();
    all_paths(&manifest.entries, &mut paths);
    assert_eq!(paths, vec!["main.rs"]);
    assert_eq!(manifest.stats.pruned_dirs, 3);
}

#[tokio::test]
async fn test_hash_mode_with_nothing_reachable_is_empty() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir(root.join("src")).unwrap();
    fs::write(root.join("src/lib.rs"), "").unwrap();
    fs::write(root.join("Cargo.toml"), "[package]").unwrap();

    let rules = IgnoreRules::empty();
    let spec = RefSpec::parse(&format!("u/r/{HASH}")).unwrap();
    let checker = FixedChecker::new(false);

    let manifest = TreeBuilder::new(root, &rules, &spec, RefMode::HashLike, &checker)
        .build()
        .await
        .unwrap();

    assert_eq!(checker.calls(), 2);
    assert!(manifest.entries.is_empty());
    assert_eq!(manifest.stats.unreachable, 2);
    assert_eq!(manifest.stats.pruned_dirs, 1);
}

#[tokio::test]
async fn test_negation_keeps_file_inside_ignored_pattern() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir(root.join("logs")).unwrap();
    fs::write(root.join("logs/app.log"), "1").unwrap();
    fs::write(root.join("logs/keep.log"), "22").unwrap();

    let rules = IgnoreRules::from_lines(root, ["*.log", "!keep.log"]);
    let spec = RefSpec::parse("u/r/main").unwrap();
    let checker = FixedChecker::new(true);

    let manifest = TreeBuilder::new(root, &rules, &spec, RefMode::BranchLike, &checker)
        .build()
        .await
        .unwrap();

    let logs = &manifest.entries[0];
    assert_eq!(logs.path(), "logs");
    let children = logs.children().unwrap();
    assert_eq!(children.len(), 1);
    assert_eq!(children[0].path(), "logs/keep.log");
    assert_eq!(children[0].size(), Some(2));
}

#[tokio::test]
async fn test_repeated_builds_are_identical() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    fs::create_dir_all(root.join("src/nested")).unwrap();
    fs::write(root.join("src/nested/a.rs"), "a").unwrap();
    fs::write(root.join("src/b.rs"), "bb").unwrap();
    fs::write(root.join("README.md"), "readme").unwrap();

    let rules = IgnoreRules::empty();
    let spec = RefSpec::parse("u/r/main").unwrap();
    let checker = FixedChecker::new(true);
    let builder = TreeBuilder::new(root, &rules, &spec, RefMode::BranchLike, &checker);

    let first = builder.build().await.unwrap().to_json().unwrap();
    let second = builder.build().await.unwrap().to_json().unwrap();

    assert_eq!(first, second);
    assert_eq!(checker.calls(), 0);
}

#[tokio::test]
async fn test_children_follow_listing_order() {
    let temp = TempDir::new().unwrap();
    let root = temp.path();
    for name in ["c.txt", "a.txt", "b.txt"] {
        fs::write(root.join(name), name).unwrap();
    }

    let listed: Vec<String> = fs::read_dir(root)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();

    let rules = IgnoreRules::empty();
    let spec = RefSpec::parse("u/r/main").unwrap();
    let checker = FixedChecker::new(true);
    let manifest = TreeBuilder::new(root, &rules, &spec, RefMode::BranchLike, &checker)
        .build()
        .await
        .unwrap();

    let names: Vec<&str> = manifest.entries.iter().map(TreeEntry::name).collect();
    assert_eq!(names, listed);
}
