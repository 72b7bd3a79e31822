use crate::error::{Error, Result};
use crate::github::model::{
    CommitActivity, CommitActivityWeek, ContributorCommitStat, IssueEvent, PullRequestDetail,
    PullRequestSummary, Repository, Review,
};
use crate::metrics::collector::SnapshotCollector;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

const USER_AGENT: &str = concat!("delivery-metrics/", env!("CARGO_PKG_VERSION"));
const ACCEPT: &str = "application/vnd.github.v3+json";

/// Typed client for the GitHub REST v3 resources the engine consumes.
pub struct GithubClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl GithubClient {
    pub fn new(base_url: impl ToString, token: Option<String>) -> Result<Self> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self {
            http,
            base_url: base_url.to_string().trim_end_matches('/').to_string(),
            token,
        })
    }

    async fn get(&self, path: &str) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.get(&url).header(reqwest::header::ACCEPT, ACCEPT);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        Ok(request.send().await?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.get(path).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                url: path.to_string(),
            });
        }
        decode(path, &response.text().await?)
    }

    /// Like `get_json`, but maps the 202 "statistics are being computed"
    /// response of the `/stats/*` endpoints to `None`.
    async fn get_stats<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let response = self.get(path).await?;
        let status = response.status();
        if status == StatusCode::ACCEPTED {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(Error::Api {
                status: status.as_u16(),
                url: path.to_string(),
            });
        }
        decode(path, &response.text().await?).map(Some)
    }
}

fn decode<T: DeserializeOwned>(path: &str, body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|source| Error::Decode {
        url: path.to_string(),
        source,
    })
}

impl SnapshotCollector for GithubClient {
    async fn open_pull_requests(&self, repo: &Repository) -> Result<Vec<PullRequestSummary>> {
        self.get_json(&format!("/repos/{repo}/pulls?state=open")).await
    }

    async fn commit_activity(&self, repo: &Repository) -> Result<CommitActivity> {
        let weeks: Option<Vec<CommitActivityWeek>> = self
            .get_stats(&format!("/repos/{repo}/stats/commit_activity"))
            .await?;
        Ok(match weeks {
            Some(weeks) => CommitActivity::Ready(weeks),
            None => CommitActivity::Pending,
        })
    }

    async fn issue_events(&self, repo: &Repository) -> Result<Vec<IssueEvent>> {
        self.get_json(&format!("/repos/{repo}/issues/events")).await
    }

    async fn closed_pull_requests(
        &self,
        repo: &Repository,
        per_page: usize,
    ) -> Result<Vec<PullRequestSummary>> {
        self.get_json(&format!("/repos/{repo}/pulls?state=closed&per_page={per_page}"))
            .await
    }

    async fn pull_request_detail(
        &self,
        repo: &Repository,
        number: u64,
    ) -> Result<PullRequestDetail> {
        self.get_json(&format!("/repos/{repo}/pulls/{number}")).await
    }

    async fn pull_request_reviews(&self, repo: &Repository, number: u64) -> Result<Vec<Review>> {
        self.get_json(&format!("/repos/{repo}/pulls/{number}/reviews"))
            .await
    }

    async fn contributor_stats(&self, repo: &Repository) -> Result<Vec<ContributorCommitStat>> {
        let stats: Option<Vec<ContributorCommitStat>> = self
            .get_stats(&format!("/repos/{repo}/stats/contributors"))
            .await?;
        Ok(stats.unwrap_or_default())
    }
}
