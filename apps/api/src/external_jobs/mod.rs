//! External job listings — proxy over the Remotive public API.
//!
//! Upstream records are reduced to `ExternalJob`: description rendered to
//! plain text with `html2text`, job type humanized, blank salary dropped.

pub mod handlers;

use std::time::Duration;

use async_trait::async_trait;
use html2text::from_read;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const SNIPPET_CHARS: usize = 200;
const REQUEST_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Error)]
pub enum ExternalJobsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned status {status}")]
    Status { status: u16 },

    #[error("description could not be converted to text: {0}")]
    HtmlToText(#[from] html2text::Error),
}

/// A listing from the third-party source, in the portal's wire shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalJob {
    pub id: i64,
    pub title: String,
    pub company: String,
    pub job_type: String,
    pub candidate_location: String,
    pub salary: Option<String>,
    pub description_snippet: String,
    pub category: String,
    pub publication_date: Option<String>,
    pub url: String,
}

/// Source of external listings. Carried in `AppState` as `Arc<dyn ExternalJobSource>`.
#[async_trait]
pub trait ExternalJobSource: Send + Sync {
    async fn search(&self, term: Option<&str>) -> Result<Vec<ExternalJob>, ExternalJobsError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Remotive client
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct RemotiveResponse {
    #[serde(default)]
    jobs: Vec<RemotiveJob>,
}

#[derive(Debug, Deserialize)]
struct RemotiveJob {
    id: i64,
    #[serde(default)]
    url: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    company_name: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    job_type: String,
    publication_date: Option<String>,
    #[serde(default)]
    candidate_required_location: String,
    salary: Option<String>,
    #[serde(default)]
    description: String,
}

#[derive(Clone)]
pub struct RemotiveClient {
    client: Client,
    base_url: String,
    limit: usize,
}

impl RemotiveClient {
    pub fn new(base_url: String, limit: usize) -> Result<Self, ExternalJobsError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url,
            limit,
        })
    }
}

#[async_trait]
impl ExternalJobSource for RemotiveClient {
    async fn search(&self, term: Option<&str>) -> Result<Vec<ExternalJob>, ExternalJobsError> {
        let limit = self.limit.to_string();
        let mut query: Vec<(&str, &str)> = vec![("limit", limit.as_str())];
        if let Some(term) = term.map(str::trim).filter(|t| !t.is_empty()) {
            query.push(("search", term));
        }

        let response = self.client.get(&self.base_url).query(&query).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("External jobs API returned {status}");
            return Err(ExternalJobsError::Status {
                status: status.as_u16(),
            });
        }

        let body: RemotiveResponse = response.json().await?;
        debug!("External jobs API returned {} listings", body.jobs.len());

        body.jobs
            .into_iter()
            .take(self.limit)
            .map(to_external_job)
            .collect()
    }
}

fn to_external_job(job: RemotiveJob) -> Result<ExternalJob, ExternalJobsError> {
    Ok(ExternalJob {
        id: job.id,
        title: job.title,
        company: job.company_name,
        job_type: humanize_job_type(&job.job_type),
        candidate_location: if job.candidate_required_location.trim().is_empty() {
            "Remote".to_string()
        } else {
            job.candidate_required_location
        },
        salary: job.salary.filter(|s| !s.trim().is_empty()),
        description_snippet: snippet(&html_to_text(&job.description)?, SNIPPET_CHARS),
        category: job.category,
        publication_date: job.publication_date,
        url: job.url,
    })
}

/// `full_time` → `Full Time`. Blank input becomes `Remote`.
fn humanize_job_type(raw: &str) -> String {
    let words: Vec<String> = raw
        .split(['_', '-', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect();

    if words.is_empty() {
        "Remote".to_string()
    } else {
        words.join(" ")
    }
}

/// Renders the description as plain text on a single line.
fn html_to_text(html: &str) -> Result<String, ExternalJobsError> {
    let text = from_read(html.as_bytes(), usize::MAX)?;
    Ok(text.split_whitespace().collect::<Vec<_>>().join(" "))
}

fn snippet(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars).collect();
    cut.truncate(cut.trim_end().len());
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_to_text_joins_paragraphs_on_one_line() {
        let html = "<p>Build APIs&nbsp;in Rust &amp; Go.</p>\n<p>Remote first.</p>";
        assert_eq!(html_to_text(html).unwrap(), "Build APIs in Rust & Go. Remote first.");
    }

    #[test]
    fn test_html_to_text_decodes_entities_and_keeps_bare_angle_bracket() {
        let html = "<p>We&rsquo;re hiring &#8211; teams of 5 < 10 engineers, salary up to $90k.</p><p>Apply now</p>";
        let text = html_to_text(html).unwrap();

        assert!(text.starts_with("We\u{2019}re hiring \u{2013} teams"), "Text was {text}");
        assert!(text.contains("5 < 10 engineers, salary up to $90k."), "Text was {text}");
        assert!(text.ends_with("Apply now"), "Text was {text}");
        assert!(!text.contains('\n'));
    }

    #[test]
    fn test_snippet_truncates_long_text() {
        let text = "word ".repeat(100);
        let cut = snippet(text.trim(), 20);
        assert!(cut.ends_with('…'));
        assert!(cut.chars().count() <= 21);
    }

    #[test]
    fn test_snippet_keeps_short_text() {
        assert_eq!(snippet("short", 200), "short");
    }

    #[test]
    fn test_humanize_job_type() {
        assert_eq!(humanize_job_type("full_time"), "Full Time");
        assert_eq!(humanize_job_type("CONTRACT"), "Contract");
        assert_eq!(humanize_job_type(""), "Remote");
    }

    #[test]
    fn test_remotive_payload_maps_to_external_job() {
        let raw = r#"{
            "job-count": 1,
            "jobs": [{
                "id": 42,
                "url": "https://remotive.com/remote-jobs/software-dev/rust-42",
                "title": "Rust Engineer",
                "company_name": "Ferris Inc",
                "category": "Software Development",
                "tags": ["rust"],
                "job_type": "full_time",
                "publication_date": "2024-05-01T10:00:00",
                "candidate_required_location": "",
                "salary": "",
                "description": "<p>Write safe code.</p>\n<p>Ship often.</p>"
            }]
        }"#;
        let parsed: RemotiveResponse = serde_json::from_str(raw).unwrap();
        let job = to_external_job(parsed.jobs.into_iter().next().unwrap()).unwrap();

        assert_eq!(job.id, 42);
        assert_eq!(job.company, "Ferris Inc");
        assert_eq!(job.job_type, "Full Time");
        assert_eq!(job.candidate_location, "Remote");
        assert_eq!(job.salary, None);
        assert_eq!(job.description_snippet, "Write safe code. Ship often.");
    }
}
