use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::fmt;

/// Repository coordinates on the forge, `owner/name`.
#[derive(Debug, Clone, Eq, Hash, PartialEq)]
pub struct Repository {
    pub owner: String,
    pub name: String,
}

impl Repository {
    pub fn new(owner: impl ToString, name: impl ToString) -> Self {
        Self {
            owner: owner.to_string(),
            name: name.to_string(),
        }
    }
}

impl fmt::Display for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Actor {
    pub login: String,
}

/// One row of a pull request listing (open or closed page).
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestSummary {
    pub number: u64,
    /// Absent for deleted ("ghost") accounts.
    pub user: Option<Actor>,
    pub created_at: DateTime<Utc>,
    pub state: String,
}

impl PullRequestSummary {
    pub fn author(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.login.as_str())
    }
}

/// Full pull request record, fetched per number.
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestDetail {
    pub number: u64,
    pub created_at: DateTime<Utc>,
    /// Unset until the pull request is merged.
    pub merged_at: Option<DateTime<Utc>>,
    pub head: Option<Head>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Head {
    /// The head repository can be gone if the fork was deleted.
    pub repo: Option<HeadRepo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HeadRepo {
    pub pushed_at: Option<DateTime<Utc>>,
}

impl PullRequestDetail {
    /// Timestamp of the last push to the head branch, if the API exposed one.
    pub fn last_push(&self) -> Option<DateTime<Utc>> {
        self.head.as_ref()?.repo.as_ref()?.pushed_at
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Review {
    pub user: Option<Actor>,
    /// Pending reviews carry no submission timestamp.
    pub submitted_at: Option<DateTime<Utc>>,
}

impl Review {
    pub fn reviewer(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.login.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommitActivityWeek {
    /// Week start, epoch seconds.
    pub week: i64,
    pub total: u64,
}

/// Weekly commit statistics, or the 202 "still computing" status.
#[derive(Debug, Clone)]
pub enum CommitActivity {
    Ready(Vec<CommitActivityWeek>),
    Pending,
}

impl CommitActivity {
    pub fn weeks(&self) -> &[CommitActivityWeek] {
        match self {
            CommitActivity::Ready(weeks) => weeks,
            CommitActivity::Pending => &[],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssueEvent {
    /// Event kind, e.g. `"reopened"`, `"closed"`, `"labeled"`.
    pub event: String,
    pub created_at: DateTime<Utc>,
}

/// One row of `/stats/contributors`: commit total across the full history.
#[derive(Debug, Clone, Deserialize)]
pub struct ContributorCommitStat {
    pub author: Option<Actor>,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_exposes_nested_push_timestamp() {
        let json = r#"{
            "number": 42,
            "created_at": "2024-03-01T10:00:00Z",
            "merged_at": null,
            "head": { "repo": { "pushed_at": "2024-03-02T08:30:00Z" } }
        }"#;
        let detail: PullRequestDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.number, 42);
        assert!(detail.merged_at.is_none());
        let push = detail.last_push().unwrap();
        assert_eq!(push.to_rfc3339(), "2024-03-02T08:30:00+00:00");
    }

    #[test]
    fn detail_tolerates_missing_head_repo() {
        let json = r#"{
            "number": 7,
            "created_at": "2024-03-01T10:00:00Z",
            "merged_at": "2024-03-03T10:00:00Z",
            "head": { "repo": null }
        }"#;
        let detail: PullRequestDetail = serde_json::from_str(json).unwrap();
        assert!(detail.last_push().is_none());
        assert!(detail.merged_at.is_some());
    }

    #[test]
    fn pending_review_has_no_submission() {
        let json = r#"[
            { "user": { "login": "alice" }, "submitted_at": "2024-03-02T09:00:00Z" },
            { "user": { "login": "bob" }, "submitted_at": null },
            { "user": null, "submitted_at": "2024-03-02T11:00:00Z" }
        ]"#;
        let reviews: Vec<Review> = serde_json::from_str(json).unwrap();
        assert_eq!(reviews[0].reviewer(), Some("alice"));
        assert!(reviews[1].submitted_at.is_none());
        assert!(reviews[2].reviewer().is_none());
    }

    #[test]
    fn contributor_stat_tolerates_null_author() {
        let json = r#"[
            { "author": { "login": "alice" }, "total": 120 },
            { "author": null, "total": 3 }
        ]"#;
        let stats: Vec<ContributorCommitStat> = serde_json::from_str(json).unwrap();
        assert_eq!(stats[0].total, 120);
        assert!(stats[1].author.is_none());
    }
}
