use crate::error::{Error, Result};
use crate::github::model::Repository;
use crate::metrics::model::MetricsReport;
use markdown_builder::Markdown;
use markdown_table::{Heading, MarkdownTable};

pub trait MarkdownReport {
    fn to_markdown(&self, repo: &Repository) -> Result<String>;
}

impl MarkdownReport for MetricsReport {
    fn to_markdown(&self, repo: &Repository) -> Result<String> {
        let mut doc = Markdown::new();
        doc.header1(format!("Delivery metrics for {repo}"));

        let rows = vec![
            metric_row("Average age of open PRs (days)", format!("{:.2}", self.open_prs_age)),
            metric_row(
                "Average weekly commit frequency",
                format!("{:.2}", self.push_frequency),
            ),
            metric_row("Reopened issues/PRs", self.reopened_count.to_string()),
            metric_row(
                "Average coding time per PR (hrs)",
                format!("{:.2}", self.coding_time),
            ),
            metric_row(
                "Average PR pickup time (hrs)",
                format!("{:.2}", self.pickup_time),
            ),
            metric_row(
                "Average PR review time (hrs)",
                format!("{:.2}", self.review_time),
            ),
        ];
        doc.paragraph(render_table(rows, vec![heading("Metric"), heading("Value")])?);

        doc.header2("Weekly commit activity");
        if self.commit_activity.labels.is_empty() {
            doc.paragraph("No commit data available".to_string());
        } else {
            let rows = self
                .commit_activity
                .labels
                .iter()
                .zip(&self.commit_activity.values)
                .map(|(label, total)| vec![label.clone(), total.to_string()])
                .collect::<Vec<_>>();
            doc.paragraph(render_table(rows, vec![heading("Week"), heading("Commits")])?);
        }

        doc.header2("Contributors");
        if self.contributors.is_empty() {
            doc.paragraph("No contributor data available".to_string());
        } else {
            let rows = self
                .contributors
                .iter()
                .map(|c| {
                    vec![
                        format!("**{}**", c.login),
                        c.commits.to_string(),
                        c.prs_created.to_string(),
                        c.prs_reviewed.to_string(),
                        format!("{:.2}", c.avg_coding_time),
                        format!("{:.2}", c.avg_pickup_time),
                        format!("{:.2}", c.avg_review_time),
                    ]
                })
                .collect::<Vec<_>>();
            let headings = vec![
                heading("Contributor"),
                heading("Commits"),
                heading("PRs created"),
                heading("PRs reviewed"),
                heading("Avg coding (hrs)"),
                heading("Avg pickup (hrs)"),
                heading("Avg review (hrs)"),
            ];
            doc.paragraph(render_table(rows, headings)?);
        }

        Ok(doc.render())
    }
}

fn metric_row(name: &str, value: String) -> Vec<String> {
    vec![name.to_string(), value]
}

fn heading(title: &str) -> Heading {
    Heading::new(title.to_string(), None)
}

fn render_table(rows: Vec<Vec<String>>, headings: Vec<Heading>) -> Result<String> {
    let mut table = MarkdownTable::new(rows);
    table.with_headings(headings);
    table
        .as_markdown()
        .map_err(|e| Error::Render(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::model::{CommitActivityChart, ContributorMetrics};

    fn sample_report() -> MetricsReport {
        MetricsReport {
            open_prs_age: 2.0,
            push_frequency: 4.0,
            reopened_count: 2,
            coding_time: 5.0,
            pickup_time: 2.0,
            review_time: 4.0,
            commit_activity: CommitActivityChart {
                labels: vec!["Jan 15".to_string()],
                values: vec![6],
            },
            contributors: vec![ContributorMetrics {
                login: "alice".to_string(),
                prs_created: 1,
                prs_reviewed: 0,
                avg_coding_time: 5.0,
                avg_pickup_time: 2.0,
                avg_review_time: 0.0,
                commits: 12,
            }],
        }
    }

    #[test]
    fn renders_all_sections() {
        let md = sample_report()
            .to_markdown(&Repository::new("acme", "app"))
            .unwrap();
        assert!(md.contains("Delivery metrics for acme/app"));
        assert!(md.contains("Weekly commit activity"));
        assert!(md.contains("Contributors"));
        assert!(md.contains("Jan 15"));
        assert!(md.contains("**alice**"));
    }

    #[test]
    fn empty_report_renders_placeholders() {
        let report = MetricsReport {
            open_prs_age: 0.0,
            push_frequency: 0.0,
            reopened_count: 0,
            coding_time: 0.0,
            pickup_time: 0.0,
            review_time: 0.0,
            commit_activity: CommitActivityChart::default(),
            contributors: vec![],
        };
        let md = report.to_markdown(&Repository::new("acme", "app")).unwrap();
        assert!(md.contains("No commit data available"));
        assert!(md.contains("No contributor data available"));
    }
}
