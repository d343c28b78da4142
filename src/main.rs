use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use testhttp::{
    config::{load_config, SettingsBuilder},
    report::{print_feature_outcome, print_summary},
    scenario::{load_feature_file, run_feature},
    HttpSteps, ReqwestRoundTrip, StepTable,
};
use tracing::Level;
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(
    name = "testhttp",
    version,
    about = "Run HTTP scenarios written in Gherkin",
    disable_help_subcommand = true
)]
struct Cli {
    /// Feature files or directories containing them (defaults to the current directory)
    #[arg(value_name = "PATHS")]
    paths: Vec<PathBuf>,

    /// Directory or file containing testhttp.json
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Select a profile from testhttp.json
    #[arg(short = 'P', long)]
    profile: Option<String>,

    /// Override env file relative to config directory
    #[arg(short, long)]
    env: Option<PathBuf>,

    /// Base URL that relative step URLs are resolved against
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in milliseconds
    #[arg(short, long, value_name = "MS")]
    timeout: Option<u64>,

    /// Log every step and round trip
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let base_dir = std::env::current_dir()?;
    let config_target = cli
        .config
        .as_ref()
        .map(|p| resolve_relative(&base_dir, p))
        .unwrap_or_else(|| base_dir.clone());

    let cfg = load_config(&config_target).context("loading configuration")?;
    let config_dir = cfg.as_ref().map(|c| c.dir.clone()).unwrap_or_else(|| {
        if config_target.is_dir() {
            config_target.clone()
        } else {
            config_target
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| config_target.clone())
        }
    });

    let settings = SettingsBuilder::new(cfg)
        .profile(cli.profile.clone())
        .env_file(cli.env.as_ref().map(|p| resolve_relative(&config_dir, p)))
        .base_url(cli.base_url.clone())
        .timeout_ms(cli.timeout)
        .build()?;

    let round_trip = ReqwestRoundTrip::from_options(&settings.transport)?;
    let mut http = HttpSteps::new(Arc::new(round_trip));
    if let Some(base_url) = settings.base_url.clone() {
        http = http.with_base_url(base_url);
    }
    let table = StepTable::with_http_steps(http)?;

    let targets = if cli.paths.is_empty() {
        vec![base_dir.clone()]
    } else {
        cli.paths
            .iter()
            .map(|p| resolve_relative(&base_dir, p))
            .collect()
    };
    let files = collect_feature_files(&targets)?;
    if files.is_empty() {
        bail!("No .feature files found");
    }

    let mut outcomes = Vec::with_capacity(files.len());
    for file in &files {
        let feature = load_feature_file(file, &settings.variables).await?;
        let outcome = run_feature(&table, &feature).await;
        print_feature_outcome(&outcome);
        outcomes.push(outcome);
    }
    print_summary(&outcomes);

    if outcomes.iter().any(|outcome| !outcome.passed()) {
        std::process::exit(1);
    }
    Ok(())
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Expands directories into the `.feature` files below them, sorted by path.
fn collect_feature_files(targets: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for target in targets {
        if target.is_file() {
            files.push(target.clone());
            continue;
        }
        if !target.is_dir() {
            bail!("No such file or directory: {}", target.display());
        }

        let mut found = Vec::new();
        for entry in WalkDir::new(target) {
            let entry = entry.with_context(|| format!("walking {}", target.display()))?;
            let path = entry.path();
            if entry.file_type().is_file()
                && path.extension().and_then(|ext| ext.to_str()) == Some("feature")
            {
                found.push(path.to_path_buf());
            }
        }
        found.sort();
        files.extend(found);
    }
    Ok(files)
}

fn resolve_relative(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
