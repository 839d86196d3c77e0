//! discover - list the source files a frontend should parse
//!
//! # Usage
//!
//! ```bash
//! # Python files under a project
//! discover -e py /path/to/project
//!
//! # Skip everything under sub/ and one explicit file
//! discover -e py --ignore-regex 'sub/.*' --ignore-path vendor/gen.py /path/to/project
//!
//! # Settings from a file, JSON output
//! discover --config discovery.json --json /path/to/project
//! ```
//!
//! Results go to stdout, one path per line (or a JSON array with `--json`).
//! Diagnostics go to stderr. Exit codes: 0 = success, 1 = error.

use anyhow::{Context, Result, bail};
use clap::Parser;
use source_discovery::{DiscoveryConfig, SourceFileDiscovery, TracingLog, validate_roots};
use std::collections::BTreeSet;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "discover")]
#[command(version)]
#[command(about = "Discover source files for static analysis")]
struct Cli {
    /// Files or directories to scan
    #[arg(required = true)]
    paths: Vec<String>,

    /// Source file extension, without the dot (repeatable)
    #[arg(short, long = "extension")]
    extensions: Vec<String>,

    /// Exclude files whose path relative to the root fully matches this regex
    #[arg(long)]
    ignore_regex: Option<String>,

    /// Exclude this file or directory (repeatable)
    #[arg(long)]
    ignore_path: Vec<String>,

    /// Apply the built-in exclusions (VCS, dependency and build directories)
    #[arg(long)]
    default_ignores: bool,

    /// Do not follow symlinks while walking directories
    #[arg(long)]
    no_follow_symlinks: bool,

    /// JSON configuration file; command-line flags are applied on top
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output JSON instead of one path per line
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(files) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&files)?);
            } else {
                for file in files {
                    println!("{}", file);
                }
            }
            Ok(())
        }
        Err(e) => {
            if cli.json {
                let err = serde_json::json!({
                    "error": format!("{:#}", e)
                });
                eprintln!("{}", serde_json::to_string_pretty(&err)?);
            } else {
                eprintln!("Error: {:#}", e);
            }
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<Vec<String>> {
    let config = build_config(cli)?;
    if config.extensions.is_empty() {
        bail!("no source extensions given; pass --extension or set `extensions` in the config");
    }

    let discovery =
        SourceFileDiscovery::from_config(&config).context("Invalid ignore configuration")?;

    if let [root] = cli.paths.as_slice() {
        return Ok(discovery.determine(root)?);
    }

    // Report every bad root before walking any of them
    validate_roots(&cli.paths, &TracingLog)?;
    let mut files = BTreeSet::new();
    for root in &cli.paths {
        files.extend(discovery.determine(root)?);
    }
    Ok(files.into_iter().collect())
}

fn build_config(cli: &Cli) -> Result<DiscoveryConfig> {
    let mut config = match &cli.config {
        Some(path) => DiscoveryConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => DiscoveryConfig::default(),
    };

    config.extensions.extend(cli.extensions.iter().cloned());
    if cli.no_follow_symlinks {
        config.follow_symlinks = false;
    }
    if cli.default_ignores {
        config.ignore = config.ignore.with_default_ignores();
    }
    if let Some(pattern) = &cli.ignore_regex {
        config.ignore.ignored_files_regex = Some(pattern.clone());
    }
    if !cli.ignore_path.is_empty() {
        config
            .ignore
            .ignored_files_path
            .get_or_insert_with(Vec::new)
            .extend(cli.ignore_path.iter().cloned());
    }

    Ok(config)
}
