//! projtree - snapshot a repository checkout into a `projectTree.json` manifest.
//!
//! Usage:
//!   projtree --github-url=<user>/<repo>/<branch|commit>
//!   projtree --github-url=<ref> --depth=1        Scan the parent directory
//!   projtree --github-url=<ref> --verbose=2      Log every step
//!   projtree --github-url=<ref> --yes            Accept all defaults
//!   projtree --help                              Show help

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use color_eyre::eyre::{Context, Result};
use inquire::InquireError;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use projtree_confirm::{
    ConfirmError, ConfirmationFlow, PromptError, Prompter, Resolution, ScriptedPrompter,
    materialize, missing_rule_files,
};
use projtree_scan::{BuildConfig, HttpChecker, IgnoreRules, Manifest, RefSpec, TreeBuilder};

#[derive(Parser)]
#[command(
    name = "projtree",
    version,
    about = "Snapshot a repository checkout into a projectTree.json manifest",
    long_about = "projtree lists every file of a checkout that is not matched by .gitignore \
                  or .ptignore, with its size and GitHub raw URL.\n\n\
                  When the ref is a commit hash, each URL is checked and files missing \
                  from that commit are left out."
)]
struct Cli {
    /// GitHub reference in the form <user>/<repo>/<branch|commit>
    #[arg(long = "github-url", value_name = "USER/REPO/REF")]
    github_url: Option<String>,

    /// Scan the directory this many levels above the current one
    #[arg(long, default_value_t = 0)]
    depth: usize,

    /// 0 = only the most necessary, 1 = the most important steps, 2 = every small step
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=2))]
    verbose: u8,

    /// Manifest file name, relative to the scanned directory
    #[arg(short, long)]
    output: Option<String>,

    /// Do not ask: keep the detected ref type and create missing ignore files with defaults
    #[arg(short, long)]
    yes: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(github_url) = cli.github_url.as_deref() else {
        eprintln!("--github-url argument is required");
        eprintln!("       format: <user>/<repo>/<branch|commit>");
        return Ok(ExitCode::FAILURE);
    };

    let refspec = RefSpec::parse(github_url).context("Invalid GitHub URL format")?;

    let cwd = std::env::current_dir().context("Cannot determine the current directory")?;
    let root = ancestor(&cwd, cli.depth);

    let mut builder = BuildConfig::builder();
    builder.root(root);
    if let Some(output) = cli.output {
        builder.output_file(output);
    }
    let config = builder.build().context("Invalid configuration")?;

    let resolution = match confirm(&config, refspec.clone(), cli.yes) {
        Ok(resolution) => resolution,
        Err(err) if err.is_user_abort() => {
            eprintln!("{err}");
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => return Err(err.into()),
    };

    materialize(&resolution.ignore_files)?;

    run_build(&config, &refspec, &resolution).await?;

    Ok(ExitCode::SUCCESS)
}

/// Set up logging for the requested verbosity. `RUST_LOG` wins when set.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// `depth` levels above `dir`, stopping at the filesystem root.
fn ancestor(dir: &Path, depth: usize) -> PathBuf {
    dir.ancestors()
        .nth(depth)
        .or_else(|| dir.ancestors().last())
        .unwrap_or(dir)
        .to_path_buf()
}

/// Settle the ref mode and the missing ignore files.
fn confirm(
    config: &BuildConfig,
    refspec: RefSpec,
    yes: bool,
) -> Result<Resolution, ConfirmError> {
    let missing = missing_rule_files(&config.ignore_paths());
    if missing.is_empty() {
        info!("Both ignore files are present");
    } else {
        info!("Asking about {} missing ignore file(s)", missing.len());
    }

    let flow = ConfirmationFlow::new(refspec, missing);

    if yes {
        let mut prompter = ScriptedPrompter::new(["c", "y"]);
        let resolution = flow.run(&mut prompter);
        for line in prompter.transcript() {
            info!("{line}");
        }
        resolution
    } else {
        flow.run(&mut TerminalPrompter)
    }
}

/// Load rules, walk the root and write the manifest.
async fn run_build(
    config: &BuildConfig,
    refspec: &RefSpec,
    resolution: &Resolution,
) -> Result<()> {
    let (rules, rule_warnings) = IgnoreRules::load(config.root(), &config.ignore_paths()).await;
    let checker =
        HttpChecker::new(config.request_timeout).context("Failed to create HTTP client")?;

    if resolution.mode.is_hash() {
        eprintln!("Scanning {} and checking URLs...", config.root().display());
    } else {
        eprintln!("Scanning {}...", config.root().display());
    }

    // The manifest and the rule files describe the checkout, they are not part of it.
    let mut builder = TreeBuilder::new(config.root(), &rules, refspec, resolution.mode, &checker)
        .skip(&config.output_file);
    for rule_file in &config.ignore_files {
        builder = builder.skip(rule_file);
    }

    let mut manifest = builder.build().await.context("Scan failed")?;
    manifest.warnings.extend(rule_warnings);

    let output_path = config.output_path();
    tokio::fs::write(&output_path, manifest.to_json()?)
        .await
        .with_context(|| format!("Failed to write {}", output_path.display()))?;

    print_summary(&manifest, &output_path);
    Ok(())
}

fn print_summary(manifest: &Manifest, output_path: &Path) {
    let stats = &manifest.stats;

    println!();
    println!("{}", "─".repeat(60));
    println!(
        " {} files, {} directories - {}",
        stats.files,
        stats.dirs,
        humansize::format_size(stats.total_size, humansize::BINARY)
    );
    println!(" Ref {} ({})", manifest.refspec, manifest.mode);
    if stats.unreachable > 0 {
        println!(" {} file(s) not found at this commit", stats.unreachable);
    }
    println!(" Scanned in {:.2}s", manifest.duration.as_secs_f64());
    println!("{}", "─".repeat(60));

    if manifest.has_warnings() {
        println!("{} warning(s) during scan", manifest.warnings.len());
    }
    println!("Manifest created: {}", output_path.display());
}

/// Asks on the terminal.
struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn say(&mut self, line: &str) {
        println!("{line}");
    }

    fn ask(&mut self, question: &str) -> Result<String, PromptError> {
        inquire::Text::new(question).prompt().map_err(|err| match err {
            InquireError::OperationCanceled | InquireError::OperationInterrupted => {
                PromptError::Closed
            }
            InquireError::NotTTY => {
                PromptError::Failed("not a terminal, run with --yes to accept defaults".to_string())
            }
            other => PromptError::Failed(other.to_string()),
        })
    }
}
