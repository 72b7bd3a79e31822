use crate::error::Result;
use crate::github::model::{
    CommitActivity, ContributorCommitStat, IssueEvent, PullRequestDetail, PullRequestSummary,
    Repository, Review,
};

/// The seven inbound resources the engine consumes, one call per concern.
///
/// Implementations fetch from the forge API; the engine itself never talks
/// to the network directly, which keeps it testable against canned data.
pub trait SnapshotCollector {
    async fn open_pull_requests(&self, repo: &Repository) -> Result<Vec<PullRequestSummary>>;

    /// Weekly commit totals, or `CommitActivity::Pending` while the forge is
    /// still preparing the statistics.
    async fn commit_activity(&self, repo: &Repository) -> Result<CommitActivity>;

    async fn issue_events(&self, repo: &Repository) -> Result<Vec<IssueEvent>>;

    /// Most-recently-closed pull requests, bounded to `per_page` entries.
    async fn closed_pull_requests(
        &self,
        repo: &Repository,
        per_page: usize,
    ) -> Result<Vec<PullRequestSummary>>;

    async fn pull_request_detail(
        &self,
        repo: &Repository,
        number: u64,
    ) -> Result<PullRequestDetail>;

    async fn pull_request_reviews(&self, repo: &Repository, number: u64) -> Result<Vec<Review>>;

    async fn contributor_stats(&self, repo: &Repository)
        -> Result<Vec<ContributorCommitStat>>;
}

/// Fetch-stage notifications for the caller's UI. All hooks default to no-op.
pub trait ReportProgress: Sync {
    fn on_snapshot(&self) {}
    fn on_closed_page(&self, _count: usize) {}
    fn on_pull_request(&self, _number: u64) {}
}

pub struct NoopProgress;

impl ReportProgress for NoopProgress {}
