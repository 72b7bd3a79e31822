mod error;
mod github;
mod metrics;
mod report;
mod utils;

use crate::error::{Error, Result};
use crate::github::{GithubClient, Repository};
use crate::metrics::{build_report, EngineOptions, MetricsReport, ReportProgress};
use crate::report::MarkdownReport;
use crate::utils::MultiProgressNew;
use chrono::Utc;
use clap::{Parser, ValueEnum};
use indicatif::{MultiProgress, ProgressBar};
use std::fs;

#[derive(Parser, Debug, Clone)]
struct Args {
    /// Repository owner (user or organization).
    #[arg(long)]
    owner: String,
    /// Repository name.
    #[arg(long)]
    repo: String,
    #[arg(long = "github_url", default_value = "https://api.github.com")]
    github_url: String,
    /// Bearer token. Anonymous requests hit a very low rate limit.
    #[arg(long = "github_token")]
    github_token: Option<String>,
    /// Closed pull requests fed to the lifecycle correlator.
    #[arg(long, default_value_t = 10)]
    closed_page_size: usize,
    /// Trailing weeks kept in the commit activity chart.
    #[arg(long, default_value_t = 10)]
    activity_weeks: usize,
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
    /// Write the report to this file instead of stdout.
    #[arg(long)]
    output: Option<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum Format {
    Json,
    Markdown,
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let args = Args::parse();
    if let Err(e) = run(&args).await {
        log::error!("metrics unavailable: {e}");
        std::process::exit(1);
    }
}

async fn run(args: &Args) -> Result<()> {
    let repo = Repository::new(&args.owner, &args.repo);
    let client = GithubClient::new(&args.github_url, args.github_token.clone())?;
    let options = EngineOptions {
        closed_page_size: args.closed_page_size,
        activity_weeks: args.activity_weeks,
    };

    let multi_progress = MultiProgress::default();
    let progress = FetchProgress::new(&multi_progress);
    let report = build_report(&client, &repo, Utc::now(), &options, &progress).await?;
    progress.finish(&report);

    let rendered = match args.format {
        Format::Json => serde_json::to_string_pretty(&report)
            .map_err(|e| Error::Render(e.to_string()))?,
        Format::Markdown => report.to_markdown(&repo)?,
    };
    match &args.output {
        Some(path) => fs::write(path, rendered)?,
        None => println!("{rendered}"),
    }
    Ok(())
}

struct FetchProgress {
    snapshot: ProgressBar,
    pulls: ProgressBar,
}

impl FetchProgress {
    fn new(multi_progress: &MultiProgress) -> Self {
        let snapshot = multi_progress.add_spinner();
        snapshot.set_message("Fetching repository snapshot ...");
        let pulls = multi_progress.add_spinner();
        pulls.set_message("Waiting for snapshot");
        Self { snapshot, pulls }
    }

    fn finish(&self, report: &MetricsReport) {
        self.pulls.finish_with_message(format!(
            "✅ Aggregated metrics for {} contributors",
            report.contributors.len()
        ));
    }
}

impl ReportProgress for FetchProgress {
    fn on_snapshot(&self) {
        self.snapshot
            .finish_with_message("✅ Fetched repository snapshot");
    }

    fn on_closed_page(&self, count: usize) {
        self.pulls
            .set_message(format!("Correlating {count} closed pull requests ..."));
    }

    fn on_pull_request(&self, number: u64) {
        self.pulls
            .set_message(format!("Correlating pull request #{number} ..."));
    }
}
