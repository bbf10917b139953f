//! Extraction pipeline
//!
//! One run is one browser, one page, one strictly sequential pass:
//! navigate, settle, scroll, settle, classify, cascade, extract. Every
//! terminal path (success, empty, or failure) releases the browser
//! exactly once.

mod cascade;
mod fields;
mod generic;
mod profile;
mod scroll;
mod types;
mod workday;

pub use cascade::SelectorStrategy;
pub use profile::SiteProfile;
pub use types::{ExtractionResult, JobRecord, RawCandidate, ScrapeError};

use std::time::Duration;

use chromiumoxide::Page;
use tracing::{debug, info, warn};
use url::Url;

use crate::Config;
use crate::browser::BrowserWrapper;
use crate::utils::wait_for_any_selector;

/// At most this many cascade selectors participate in the presence probe.
const PROBE_SELECTOR_LIMIT: usize = 4;

/// Pipeline stages, in the order every run passes through them.
/// Transitions are strictly sequential; there is no branching back.
#[derive(Debug, Clone, Copy)]
enum Stage {
    BrowserLaunching,
    PageLoading,
    Settling,
    ScrollTriggering,
    ProfileDispatch,
    Extracting,
}

fn enter(stage: Stage) {
    debug!(?stage, "entering stage");
}

/// Drives extraction runs.
///
/// Cheap to construct and clone; each `scrape` call launches and owns
/// its own browser instance for the duration of the run. Runs never
/// share browser state, so a host may execute several concurrently.
#[derive(Debug, Clone)]
pub struct JobScraper {
    config: Config,
}

impl JobScraper {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Extract job listings from one rendered career page.
    ///
    /// Never panics and never returns a raw error: every failure mode is
    /// folded into an `ExtractionResult` with `success: false` and a
    /// human-readable message. Zero accepted listings is reported the
    /// same way, with guidance text rather than a crash.
    pub async fn scrape(&self, target_url: &str) -> ExtractionResult {
        if let Err(e) = validate_target(target_url) {
            return ExtractionResult::failed(e.to_string());
        }

        enter(Stage::BrowserLaunching);
        let wrapper = match BrowserWrapper::launch(&self.config.browser).await {
            Ok(wrapper) => wrapper,
            // Nothing acquired yet, nothing to release.
            Err(e) => return ExtractionResult::failed(ScrapeError::from(e).to_string()),
        };

        // shutdown() consumes the wrapper, so each arm below releases the
        // browser exactly once and no path can skip it.
        let outcome = match wrapper.open_page(&self.config.browser).await {
            Ok(page) => {
                let outcome = self.run_pipeline(&page, target_url).await;
                wrapper.shutdown().await;
                outcome
            }
            Err(e) => {
                wrapper.shutdown().await;
                Err(ScrapeError::from(e))
            }
        };

        match outcome {
            Ok(jobs) => {
                info!(url = target_url, count = jobs.len(), "extraction complete");
                ExtractionResult::completed(jobs)
            }
            Err(e) => {
                warn!(url = target_url, error = %e, "extraction failed");
                ExtractionResult::failed(e.to_string())
            }
        }
    }

    async fn run_pipeline(
        &self,
        page: &Page,
        target_url: &str,
    ) -> Result<Vec<JobRecord>, ScrapeError> {
        let waits = &self.config.waits;

        enter(Stage::PageLoading);
        let navigation = async {
            page.goto(target_url).await?;
            page.wait_for_navigation().await?;
            Ok::<_, chromiumoxide::error::CdpError>(())
        };
        tokio::time::timeout(Duration::from_millis(waits.navigation_timeout_ms), navigation)
            .await
            .map_err(|_| ScrapeError::NavigationTimeout(waits.navigation_timeout_ms))?
            .map_err(|e| ScrapeError::Navigation(e.to_string()))?;

        enter(Stage::Settling);
        tokio::time::sleep(Duration::from_millis(waits.post_load_settle_ms)).await;

        enter(Stage::ScrollTriggering);
        scroll::trigger_lazy_load(page, &self.config.scroll).await;
        tokio::time::sleep(Duration::from_millis(waits.post_scroll_settle_ms)).await;

        enter(Stage::ProfileDispatch);
        let profile = SiteProfile::classify(target_url);
        info!(?profile, "profile selected");

        let strategies = profile.strategies();
        let probe: Vec<&str> = strategies
            .iter()
            .take(PROBE_SELECTOR_LIMIT)
            .map(|s| s.selector)
            .collect();
        let probe_deadline = Duration::from_millis(waits.selector_probe_ms);
        match wait_for_any_selector(page, &probe, probe_deadline).await {
            Some(idx) => debug!(selector = probe[idx], "listing markup present"),
            // Advisory only: slow tenants sometimes render listings after
            // the deadline, and the cascade costs little on a dry page.
            None => warn!(
                "no listing selector appeared within {}ms, extracting anyway",
                waits.selector_probe_ms
            ),
        }

        enter(Stage::Extracting);
        let candidates =
            cascade::run_cascade(strategies, |strategy| evaluate_strategy(page, profile, strategy))
                .await?;

        let page_url = match page.url().await {
            Ok(Some(url)) => url,
            _ => target_url.to_string(),
        };

        let jobs =
            fields::assemble_records(profile, candidates, &page_url, self.config.min_title_chars);
        if jobs.is_empty() {
            return Err(ScrapeError::NoListings);
        }
        Ok(jobs)
    }
}

/// Run one strategy's harvest recipe against the live page.
async fn evaluate_strategy(
    page: &Page,
    profile: SiteProfile,
    strategy: SelectorStrategy,
) -> Result<Vec<RawCandidate>, ScrapeError> {
    let script = profile.harvest_script(strategy.selector);
    let result = page
        .evaluate(script)
        .await
        .map_err(|e| ScrapeError::Evaluation(e.to_string()))?;

    result
        .into_value()
        .map_err(|e| ScrapeError::Evaluation(e.to_string()))
}

fn validate_target(target_url: &str) -> Result<(), ScrapeError> {
    let parsed =
        Url::parse(target_url).map_err(|e| ScrapeError::InvalidUrl(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ScrapeError::InvalidUrl(format!(
            "unsupported scheme {other:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_http_and_https_targets() {
        assert!(validate_target("https://acme.myworkdayjobs.com/External").is_ok());
        assert!(validate_target("http://example.com/careers").is_ok());
    }

    #[test]
    fn rejects_other_schemes_and_garbage() {
        assert!(matches!(
            validate_target("file:///etc/passwd"),
            Err(ScrapeError::InvalidUrl(_))
        ));
        assert!(matches!(
            validate_target("not a url"),
            Err(ScrapeError::InvalidUrl(_))
        ));
    }

    #[test]
    fn probe_uses_at_most_four_selectors() {
        assert!(SiteProfile::Workday.strategies().len() <= PROBE_SELECTOR_LIMIT);
        assert_eq!(
            SiteProfile::Generic
                .strategies()
                .iter()
                .take(PROBE_SELECTOR_LIMIT)
                .count(),
            4
        );
    }
}
