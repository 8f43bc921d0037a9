//! Build configuration types.

use std::path::{Path, PathBuf};
use std::time::Duration;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Rule files read from the scan root, in precedence order.
pub const DEFAULT_IGNORE_FILES: [&str; 2] = [".gitignore", ".ptignore"];

/// Manifest file written to the scan root.
pub const DEFAULT_OUTPUT_FILE: &str = "projectTree.json";

/// Configuration for a manifest build.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct BuildConfig {
    /// Root path to scan. Every entry path is relative to it.
    pub root: PathBuf,

    /// Ignore rule file names, relative to `root`. Later files take precedence.
    #[builder(default = "default_ignore_files()")]
    #[serde(default = "default_ignore_files")]
    pub ignore_files: Vec<String>,

    /// Output file name, relative to `root`.
    #[builder(default = "default_output_file()")]
    #[serde(default = "default_output_file")]
    pub output_file: String,

    /// Timeout for each reachability request.
    #[builder(default = "default_request_timeout()")]
    #[serde(default = "default_request_timeout")]
    pub request_timeout: Duration,
}

fn default_ignore_files() -> Vec<String> {
    DEFAULT_IGNORE_FILES.iter().map(|s| s.to_string()).collect()
}

fn default_output_file() -> String {
    DEFAULT_OUTPUT_FILE.to_string()
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

impl BuildConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }
        if let Some(ref output) = self.output_file {
            if output.trim().is_empty() {
                return Err("Output file name cannot be empty".to_string());
            }
        }
        Ok(())
    }
}

impl BuildConfig {
    /// Create a new build config builder.
    pub fn builder() -> BuildConfigBuilder {
        BuildConfigBuilder::default()
    }

    /// Create a config with defaults for scanning a path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ignore_files: default_ignore_files(),
            output_file: default_output_file(),
            request_timeout: default_request_timeout(),
        }
    }

    /// Absolute locations of the ignore rule files.
    pub fn ignore_paths(&self) -> Vec<PathBuf> {
        self.ignore_files.iter().map(|name| self.root.join(name)).collect()
    }

    /// Absolute location of the manifest file.
    pub fn output_path(&self) -> PathBuf {
        self.root.join(&self.output_file)
    }

    /// Scan root.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
