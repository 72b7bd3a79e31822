use crate::error::Result;
use crate::github::model::{
    CommitActivity, ContributorCommitStat, IssueEvent, PullRequestDetail, PullRequestSummary,
    Repository, Review,
};
use crate::metrics::collector::{ReportProgress, SnapshotCollector};
use crate::metrics::model::{
    mean, CommitActivityChart, ContributorLedger, LifecycleSamples, MetricsReport,
};
use chrono::{DateTime, Duration, Utc};
use itertools::Itertools;

const MS_PER_HOUR: f64 = 3_600_000.0;
const MS_PER_DAY: f64 = 86_400_000.0;

#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Size of the closed pull request page fed to the correlator.
    pub closed_page_size: usize,
    /// Trailing weeks kept in the commit activity projection.
    pub activity_weeks: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            closed_page_size: 10,
            activity_weeks: 10,
        }
    }
}

/// Run one full aggregation pass and assemble the report.
///
/// The three top-level resources are fetched concurrently and any of them
/// failing fails the whole report. Per pull request, a detail or review fetch
/// failure only drops that pull request from the averages; a contributor-stat
/// failure only zeroes commit totals. `now` is explicit so two runs over the
/// same snapshot produce identical reports.
pub async fn build_report<C: SnapshotCollector>(
    collector: &C,
    repo: &Repository,
    now: DateTime<Utc>,
    options: &EngineOptions,
    progress: &dyn ReportProgress,
) -> Result<MetricsReport> {
    let (open_prs, activity, events) = futures::try_join!(
        collector.open_pull_requests(repo),
        collector.commit_activity(repo),
        collector.issue_events(repo),
    )?;
    progress.on_snapshot();

    let closed_prs = collector
        .closed_pull_requests(repo, options.closed_page_size)
        .await?;
    progress.on_closed_page(closed_prs.len());

    let mut samples = LifecycleSamples::default();
    let mut ledger = ContributorLedger::new();
    for pr in &closed_prs {
        progress.on_pull_request(pr.number);
        let Some((detail, reviews)) = fetch_lifecycle(collector, repo, pr.number).await else {
            continue;
        };
        correlate_pull_request(pr, &detail, &reviews, &mut samples, &mut ledger);
    }

    match collector.contributor_stats(repo).await {
        Ok(stats) => merge_commit_totals(&mut ledger, stats),
        Err(e) => log::warn!("contributor commit stats unavailable for {repo}: {e}"),
    }

    Ok(MetricsReport {
        open_prs_age: open_prs_age(&open_prs, now),
        push_frequency: push_frequency(&activity),
        reopened_count: reopened_count(&events),
        coding_time: mean(&samples.coding),
        pickup_time: mean(&samples.pickup),
        review_time: mean(&samples.review),
        commit_activity: activity_chart(&activity, options.activity_weeks),
        contributors: ledger.finalize(),
    })
}

/// Mean age of open pull requests in days. Empty input yields 0, not NaN.
fn open_prs_age(open_prs: &[PullRequestSummary], now: DateTime<Utc>) -> f64 {
    if open_prs.is_empty() {
        return 0.0;
    }
    let total: f64 = open_prs
        .iter()
        .map(|pr| now.signed_duration_since(pr.created_at).num_milliseconds() as f64 / MS_PER_DAY)
        .sum();
    total / open_prs.len() as f64
}

fn push_frequency(activity: &CommitActivity) -> f64 {
    let weeks = activity.weeks();
    if weeks.is_empty() {
        return 0.0;
    }
    weeks.iter().map(|w| w.total as f64).sum::<f64>() / weeks.len() as f64
}

fn reopened_count(events: &[IssueEvent]) -> usize {
    events.iter().filter(|e| e.event == "reopened").count()
}

fn activity_chart(activity: &CommitActivity, trailing_weeks: usize) -> CommitActivityChart {
    let weeks = activity.weeks();
    let start = weeks.len().saturating_sub(trailing_weeks);
    let mut chart = CommitActivityChart::default();
    for week in &weeks[start..] {
        let label = DateTime::<Utc>::from_timestamp(week.week, 0)
            .map(|day| day.format("%b %d").to_string())
            .unwrap_or_default();
        chart.labels.push(label);
        chart.values.push(week.total);
    }
    chart
}

/// Fetch one pull request's detail and reviews, or `None` if either call
/// failed. Failures are logged and isolated to this pull request.
async fn fetch_lifecycle<C: SnapshotCollector>(
    collector: &C,
    repo: &Repository,
    number: u64,
) -> Option<(PullRequestDetail, Vec<Review>)> {
    let detail = match collector.pull_request_detail(repo, number).await {
        Ok(detail) => detail,
        Err(e) => {
            log::warn!("skipping pull request #{number}: detail fetch failed: {e}");
            return None;
        }
    };
    let reviews = match collector.pull_request_reviews(repo, number).await {
        Ok(reviews) => reviews,
        Err(e) => {
            log::warn!("skipping pull request #{number}: review fetch failed: {e}");
            return None;
        }
    };
    Some((detail, reviews))
}

fn correlate_pull_request(
    pr: &PullRequestSummary,
    detail: &PullRequestDetail,
    reviews: &[Review],
    samples: &mut LifecycleSamples,
    ledger: &mut ContributorLedger,
) {
    let author = pr.author();
    let created = detail.created_at;
    let first_review = first_review(reviews);

    if let Some(login) = author {
        ledger.record(login).prs_created += 1;
    }
    // One review credit per pull request, however many passes the reviewer
    // made, and never for the author reviewing their own change.
    for reviewer in reviews.iter().filter_map(Review::reviewer).unique() {
        if Some(reviewer) != author {
            ledger.record(reviewer).prs_reviewed += 1;
        }
    }

    if let Some(pushed) = detail.last_push() {
        match positive_hours(created, pushed) {
            Some(hours) => {
                samples.coding.push(hours);
                if let Some(login) = author {
                    ledger.record(login).coding_hours.push(hours);
                }
            }
            // Rebase and clock artifacts can place the push before creation.
            None => log::debug!(
                "pull request #{} has an unusual time sequence, dropping coding sample",
                pr.number
            ),
        }
    }

    if let Some((_, submitted)) = first_review {
        if let Some(hours) = positive_hours(created, submitted) {
            samples.pickup.push(hours);
            if let Some(login) = author {
                ledger.record(login).pickup_hours.push(hours);
            }
        }
    }

    if let (Some((review, submitted)), Some(merged)) = (first_review, detail.merged_at) {
        if let Some(hours) = positive_hours(submitted, merged) {
            samples.review.push(hours);
            if let Some(login) = review.reviewer() {
                ledger.record(login).review_hours.push(hours);
            }
        }
    }
}

/// Earliest submitted review. Pending (unsubmitted) reviews do not count, and
/// wire order is not trusted.
fn first_review(reviews: &[Review]) -> Option<(&Review, DateTime<Utc>)> {
    reviews
        .iter()
        .filter_map(|r| r.submitted_at.map(|t| (r, t)))
        .min_by_key(|&(_, t)| t)
}

fn positive_hours(start: DateTime<Utc>, end: DateTime<Utc>) -> Option<f64> {
    let delta = end.signed_duration_since(start);
    if delta > Duration::zero() {
        Some(delta.num_milliseconds() as f64 / MS_PER_HOUR)
    } else {
        None
    }
}

fn merge_commit_totals(ledger: &mut ContributorLedger, stats: Vec<ContributorCommitStat>) {
    for stat in stats {
        if let Some(author) = stat.author {
            ledger.record(&author.login).commits = stat.total;
        }
    }
}
