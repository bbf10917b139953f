//! Candidate normalization, filtering, and record assembly
//!
//! Harvest recipes hand back strings exactly as the DOM held them. This
//! module collapses whitespace, walks the location fallback chain,
//! applies the acceptance filter, and numbers the survivors.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::extract::profile::SiteProfile;
use crate::extract::types::{JobRecord, RawCandidate};
use crate::utils::constants::LOCATION_NOT_SPECIFIED;

/// "City, ST" / "City, Region" scan over the listing container's text.
/// U.S.-leaning: two-letter state codes match far more reliably than
/// spelled-out regions. Last resort before the sentinel.
static CITY_REGION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[A-Z][A-Za-z.'-]+(?: [A-Z][A-Za-z.'-]+)*, (?:[A-Z]{2}\b|[A-Z][a-z]+)")
        .expect("location pattern compiles")
});

/// Collapse whitespace runs to single spaces and trim.
pub fn normalize_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Location fallback chain: selector hit from the recipe, then a pattern
/// scan of the container text, then the sentinel.
fn resolve_location(candidate: &RawCandidate) -> String {
    if let Some(location) = candidate.location.as_deref() {
        let location = normalize_ws(location);
        if !location.is_empty() {
            return location;
        }
    }

    if let Some(context) = candidate.context.as_deref() {
        let context = normalize_ws(context);
        if let Some(hit) = CITY_REGION.find(&context) {
            return hit.as_str().to_string();
        }
    }

    LOCATION_NOT_SPECIFIED.to_string()
}

/// Turn raw candidates into accepted job records.
///
/// A candidate survives only with a title longer than `min_title_chars`;
/// Workday candidates additionally need a resolved link. Rejections are
/// silent per item; only the aggregate counts are logged.
///
/// Numbering differs by profile and both behaviors are load-bearing:
/// Workday ids enumerate accepted records (contiguous), the generic
/// profile numbers every processed candidate before filtering, so
/// rejections leave gaps.
pub fn assemble_records(
    profile: SiteProfile,
    candidates: Vec<RawCandidate>,
    page_url: &str,
    min_title_chars: usize,
) -> Vec<JobRecord> {
    let processed = candidates.len();

    let records: Vec<JobRecord> = match profile {
        SiteProfile::Workday => candidates
            .iter()
            .filter_map(|candidate| {
                let title = normalize_ws(&candidate.title);
                let url = candidate.href.clone().unwrap_or_default();
                if title.chars().count() > min_title_chars && !url.is_empty() {
                    Some((title, url, resolve_location(candidate)))
                } else {
                    None
                }
            })
            .enumerate()
            .map(|(idx, (title, url, location))| JobRecord {
                id: idx + 1,
                title,
                location,
                url,
            })
            .collect(),

        SiteProfile::Generic => candidates
            .iter()
            .enumerate()
            .filter_map(|(idx, candidate)| {
                let title = normalize_ws(&candidate.title);
                if title.chars().count() <= min_title_chars {
                    return None;
                }
                let url = candidate
                    .href
                    .clone()
                    .filter(|href| !href.is_empty())
                    .unwrap_or_else(|| page_url.to_string());
                Some(JobRecord {
                    id: idx + 1,
                    title,
                    location: resolve_location(candidate),
                    url,
                })
            })
            .collect(),
    };

    debug!(?profile, processed, accepted = records.len(), "assembled records");
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "https://example.com/careers";

    fn workday_candidate(title: &str, location: &str, href: &str) -> RawCandidate {
        RawCandidate {
            title: title.into(),
            location: Some(location.into()),
            context: None,
            href: Some(href.into()),
        }
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(
            normalize_ws("  Senior\n   Rust\tEngineer "),
            "Senior Rust Engineer"
        );
        assert_eq!(normalize_ws("   \n\t "), "");
    }

    #[test]
    fn workday_drops_short_titles_and_renumbers() {
        let candidates = vec![
            workday_candidate("Engineer", "Oslo, Norway", "https://acme.example/job/1"),
            workday_candidate("Product Manager", "Austin, TX", "https://acme.example/job/2"),
            workday_candidate("ab", "Austin, TX", "https://acme.example/job/3"),
        ];

        let records = assemble_records(SiteProfile::Workday, candidates, PAGE, 3);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 1);
        assert_eq!(records[1].id, 2);
        assert_eq!(records[0].title, "Engineer");
        assert_eq!(records[0].location, "Oslo, Norway");
        assert_eq!(records[1].location, "Austin, TX");
    }

    #[test]
    fn workday_requires_a_resolved_link() {
        let mut missing = workday_candidate("Data Engineer", "Berlin, Germany", "");
        missing.href = None;
        let empty = workday_candidate("Staff Engineer", "Berlin, Germany", "");

        let records = assemble_records(SiteProfile::Workday, vec![missing, empty], PAGE, 3);
        assert!(records.is_empty());
    }

    #[test]
    fn generic_numbers_candidates_before_filtering() {
        let candidates = vec![
            RawCandidate {
                title: "QA".into(), // rejected, still consumes id 1
                ..Default::default()
            },
            RawCandidate {
                title: "Backend Developer".into(),
                href: Some("https://example.com/jobs/42".into()),
                ..Default::default()
            },
            RawCandidate {
                title: "Frontend Developer".into(),
                ..Default::default()
            },
        ];

        let records = assemble_records(SiteProfile::Generic, candidates, PAGE, 3);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 2);
        assert_eq!(records[1].id, 3);
        assert_eq!(records[0].url, "https://example.com/jobs/42");
        // No link anywhere in the candidate: fall back to the page URL.
        assert_eq!(records[1].url, PAGE);
    }

    #[test]
    fn location_falls_back_to_pattern_scan_then_sentinel() {
        let from_context = RawCandidate {
            title: "Site Reliability Engineer".into(),
            location: None,
            context: Some("Site Reliability Engineer\n Posted today \u{00b7} San Francisco, CA \u{00b7} Full-time".into()),
            href: Some("https://acme.example/job/9".into()),
        };
        let bare = RawCandidate {
            title: "Warehouse Associate".into(),
            location: None,
            context: Some("Warehouse Associate - apply now".into()),
            href: Some("https://acme.example/job/10".into()),
        };

        let records =
            assemble_records(SiteProfile::Workday, vec![from_context, bare], PAGE, 3);

        assert_eq!(records[0].location, "San Francisco, CA");
        assert_eq!(records[1].location, LOCATION_NOT_SPECIFIED);
    }

    #[test]
    fn blank_location_selector_hit_still_falls_through() {
        let candidate = RawCandidate {
            title: "Machinist".into(),
            location: Some("   \n ".into()),
            context: Some("Machinist \u{2014} Cleveland, OH".into()),
            href: Some("https://acme.example/job/11".into()),
        };

        let records = assemble_records(SiteProfile::Workday, vec![candidate], PAGE, 3);
        assert_eq!(records[0].location, "Cleveland, OH");
    }

    #[test]
    fn city_region_pattern_accepts_spelled_out_regions() {
        assert_eq!(
            CITY_REGION.find("works from London, England mostly").unwrap().as_str(),
            "London, England"
        );
    }

    #[test]
    fn extraction_is_idempotent_over_a_snapshot() {
        let snapshot = vec![
            workday_candidate("Engineer", "Oslo, Norway", "https://acme.example/job/1"),
            workday_candidate("Designer II", "", "https://acme.example/job/2"),
        ];

        let first = assemble_records(SiteProfile::Workday, snapshot.clone(), PAGE, 3);
        let second = assemble_records(SiteProfile::Workday, snapshot, PAGE, 3);
        assert_eq!(first, second);
    }

    #[test]
    fn titles_in_accepted_records_always_exceed_the_threshold() {
        let candidates: Vec<RawCandidate> = ["a", "ab", "abc", "abcd", "Senior Engineer"]
            .iter()
            .map(|t| workday_candidate(t, "Remote", "https://acme.example/job"))
            .collect();

        let records = assemble_records(SiteProfile::Workday, candidates, PAGE, 3);
        assert!(records.iter().all(|r| r.title.chars().count() > 3));
        assert_eq!(records.len(), 2);
    }
}
