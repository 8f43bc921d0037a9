//! Manifest building engine for projtree.
//!
//! This crate walks a repository checkout and turns it into a tree of
//! [`TreeEntry`] values, dropping everything matched by the loaded ignore
//! rules and pruning directories left without content.
//!
//! # Overview
//!
//! - **Ignore rules** ([`IgnoreRules`]) combine `.gitignore` and `.ptignore`
//!   with standard gitignore precedence.
//! - **Tree building** ([`TreeBuilder`]) is a single sequential pass in
//!   directory-listing order.
//! - **Reachability** ([`ReachabilityChecker`]) verifies each file's raw URL
//!   when the reference is a commit hash. [`HttpChecker`] does this with a
//!   `HEAD` request.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use projtree_scan::{BuildConfig, HttpChecker, IgnoreRules, RefSpec, TreeBuilder};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = BuildConfig::new(".");
//! let spec = RefSpec::parse("owner/repo/main")?;
//! let (rules, _warnings) = IgnoreRules::load(config.root(), &config.ignore_paths()).await;
//! let checker = HttpChecker::new(Duration::from_secs(30))?;
//!
//! let manifest = TreeBuilder::new(config.root(), &rules, &spec, spec.classify(), &checker)
//!     .build()
//!     .await?;
//! println!("{}", manifest.to_json()?);
//! # Ok(())
//! # }
//! ```

mod builder;
mod reachability;
mod rules;

pub use builder::TreeBuilder;
pub use reachability::{
    BoxFuture, HttpChecker, Reachability, ReachabilityChecker, UnreachableReason,
};
pub use rules::IgnoreRules;

// Re-export core types for convenience
pub use projtree_core::{
    BuildConfig, BuildError, BuildWarning, EntryKind, Manifest, ManifestStats, RefMode, RefSpec,
    TreeEntry, WarningKind,
};
