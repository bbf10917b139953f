//! Records and failure taxonomy of the extraction pipeline

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::browser::BrowserError;

/// One extracted job listing. Immutable once assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    /// 1-based number within one extraction run.
    pub id: usize,
    pub title: String,
    pub location: String,
    pub url: String,
}

/// Outcome of one extraction run.
///
/// `jobs` is populated iff `success`; `error` carries the human-readable
/// failure otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub jobs: Vec<JobRecord>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExtractionResult {
    pub fn completed(jobs: Vec<JobRecord>) -> Self {
        Self {
            success: true,
            jobs,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            jobs: Vec::new(),
            error: Some(message.into()),
        }
    }
}

/// Raw candidate as returned across the in-page evaluation boundary.
///
/// Harvest recipes send back plain data only; no DOM handle survives the
/// boundary. All strings are exactly as the DOM held them; whitespace
/// collapsing and trimming happen host-side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawCandidate {
    #[serde(default)]
    pub title: String,

    /// First non-empty hit of the profile's location selectors, if any.
    #[serde(default)]
    pub location: Option<String>,

    /// Text of the enclosing listing container, for the pattern fallback.
    #[serde(default)]
    pub context: Option<String>,

    /// Resolved absolute link target, if the candidate had one.
    #[serde(default)]
    pub href: Option<String>,
}

/// Everything that can end an extraction run without records.
///
/// All variants are folded into `ExtractionResult { success: false }` at
/// the orchestrator boundary; none escape the crate as a panic or raw
/// error.
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Invalid target URL: {0}")]
    InvalidUrl(String),

    #[error("Browser error: {0}")]
    Browser(#[from] BrowserError),

    #[error("Navigation timed out after {0}ms")]
    NavigationTimeout(u64),

    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Page evaluation failed: {0}")]
    Evaluation(String),

    #[error(
        "No job listings found. The page may require interaction, \
         or its markup is not recognized by any extraction strategy."
    )]
    NoListings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completed_result_carries_jobs() {
        let result = ExtractionResult::completed(vec![JobRecord {
            id: 1,
            title: "Platform Engineer".into(),
            location: "Remote".into(),
            url: "https://example.com/jobs/1".into(),
        }]);
        assert!(result.success);
        assert_eq!(result.jobs.len(), 1);
        assert!(result.error.is_none());
    }

    #[test]
    fn failed_result_carries_message_only() {
        let result = ExtractionResult::failed(ScrapeError::NoListings.to_string());
        assert!(!result.success);
        assert!(result.jobs.is_empty());
        assert!(result.error.unwrap().starts_with("No job listings found"));
    }

    #[test]
    fn failed_result_omits_empty_jobs_in_json() {
        let json = serde_json::to_string(&ExtractionResult::failed("boom")).unwrap();
        assert!(!json.contains("\"jobs\""));
        assert!(json.contains("\"error\":\"boom\""));
    }

    #[test]
    fn raw_candidate_tolerates_missing_fields() {
        let candidate: RawCandidate = serde_json::from_str(r#"{"title":"Engineer"}"#).unwrap();
        assert_eq!(candidate.title, "Engineer");
        assert!(candidate.location.is_none());
        assert!(candidate.href.is_none());
    }
}
