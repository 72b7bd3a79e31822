use indexmap::IndexMap;
use serde::Serialize;

/// The finished report, serialized camelCase for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsReport {
    /// Mean age of currently open pull requests, days.
    pub open_prs_age: f64,
    /// Mean commits per week over the full activity window.
    pub push_frequency: f64,
    pub reopened_count: usize,
    /// Mean hours from creation to last push, over qualifying closed PRs.
    pub coding_time: f64,
    /// Mean hours from creation to first review.
    pub pickup_time: f64,
    /// Mean hours from first review to merge.
    pub review_time: f64,
    pub commit_activity: CommitActivityChart,
    /// Ordered by total commits descending.
    pub contributors: Vec<ContributorMetrics>,
}

/// Parallel label/value sequences for the trailing weekly commit window.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CommitActivityChart {
    pub labels: Vec<String>,
    pub values: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributorMetrics {
    pub login: String,
    pub prs_created: usize,
    pub prs_reviewed: usize,
    pub avg_coding_time: f64,
    pub avg_pickup_time: f64,
    pub avg_review_time: f64,
    pub commits: u64,
}

/// Running totals for one contributor during a single aggregation pass.
#[derive(Debug, Default)]
pub struct ContributorRecord {
    pub prs_created: usize,
    pub prs_reviewed: usize,
    pub coding_hours: Vec<f64>,
    pub pickup_hours: Vec<f64>,
    pub review_hours: Vec<f64>,
    pub commits: u64,
}

/// Per-login accumulators, created lazily on first mention and scoped to one
/// run. Insertion order is kept so equal commit counts stay stable.
#[derive(Debug, Default)]
pub struct ContributorLedger {
    records: IndexMap<String, ContributorRecord>,
}

impl ContributorLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, login: &str) -> &mut ContributorRecord {
        self.records.entry(login.to_string()).or_default()
    }

    pub fn finalize(self) -> Vec<ContributorMetrics> {
        let mut contributors = self
            .records
            .into_iter()
            .map(|(login, record)| ContributorMetrics {
                login,
                prs_created: record.prs_created,
                prs_reviewed: record.prs_reviewed,
                avg_coding_time: mean(&record.coding_hours),
                avg_pickup_time: mean(&record.pickup_hours),
                avg_review_time: mean(&record.review_hours),
                commits: record.commits,
            })
            .collect::<Vec<_>>();
        contributors.sort_by(|a, b| b.commits.cmp(&a.commits));
        contributors
    }
}

/// Duration samples pooled across the whole closed-PR page.
#[derive(Debug, Default)]
pub struct LifecycleSamples {
    pub coding: Vec<f64>,
    pub pickup: Vec<f64>,
    pub review: Vec<f64>,
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}
