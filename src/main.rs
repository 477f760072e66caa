use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use url::Url;

use lookout::config::AppConfig;
use lookout::fetcher::{Fetch, PageFetcher};
use lookout::models::{RuleSet, RunStatus, Target, rule, target};
use lookout::notifiers::EmailNotifier;
use lookout::queue::TaskQueue;

#[derive(Parser)]
#[command(
    name = "lookout",
    about = "Fetches remote pages and mails an alert when a watched condition is met",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Track prices against per-host extraction rules
    Track {
        /// JSON list of price targets
        #[arg(long)]
        targets: PathBuf,
        /// JSON list of per-host extraction rules
        #[arg(long)]
        rules: PathBuf,
    },
    /// Search pages for configured keywords
    Search {
        /// JSON list of keyword targets
        #[arg(long)]
        targets: PathBuf,
    },
    /// Fetch each URL once and print the body, without extraction
    Fetch {
        /// JSON list of hosts: [{"url": "..."}]
        #[arg(long)]
        hosts: PathBuf,
    },
}

#[derive(Deserialize)]
struct FetchHost {
    url: Url,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("lookout=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env().context("failed to load configuration")?;

    match cli.command {
        Command::Track { targets, rules } => {
            let targets = target::load_price_targets(&targets)?;
            info!("Loaded {} price targets", targets.len());
            let rules = RuleSet::new(rule::load_rules(&rules)?)?;
            info!("Loaded {} extraction rules", rules.len());
            let targets = targets.into_iter().map(Target::Price).collect();
            run(&config, targets, rules).await
        }
        Command::Search { targets } => {
            let targets = target::load_keyword_targets(&targets)?;
            info!("Loaded {} keyword targets", targets.len());
            let targets = targets.into_iter().map(Target::Keyword).collect();
            run(&config, targets, RuleSet::default()).await
        }
        Command::Fetch { hosts } => fetch_only(&config, &hosts).await,
    }
}

async fn run(config: &AppConfig, targets: Vec<Target>, rules: RuleSet) -> Result<ExitCode> {
    let fetcher = Arc::new(PageFetcher::new(&config.watcher)?);
    let notifier = Arc::new(EmailNotifier::new(config.smtp.as_ref())?);
    let queue = TaskQueue::new(fetcher, notifier, rules, config.operator_address())
        .with_delay(Duration::from_millis(config.watcher.delay_ms));

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let report = queue.run_until(targets, cancel).await;
    info!("{}", serde_json::to_string(&report)?);

    match report.status() {
        RunStatus::Success => {
            info!("Program ends successfully.");
            Ok(ExitCode::SUCCESS)
        }
        RunStatus::PartialFailure => {
            error!("One or more tasks failed.");
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Debugging aid: GET every listed URL and print the raw body.
async fn fetch_only(config: &AppConfig, hosts: &Path) -> Result<ExitCode> {
    let raw = std::fs::read_to_string(hosts)
        .with_context(|| format!("failed to read {}", hosts.display()))?;
    let hosts: Vec<FetchHost> =
        serde_json::from_str(&raw).context("failed to parse host list")?;

    let fetcher = PageFetcher::new(&config.watcher)?;
    for host in hosts {
        match fetcher.fetch(&host.url).await {
            Ok(body) => println!("{body}"),
            Err(e) => error!("{}", e),
        }
    }
    Ok(ExitCode::SUCCESS)
}
