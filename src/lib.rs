//! Job-listing extraction from rendered career pages
//!
//! Drives a headless Chrome instance via chromiumoxide, runs a cascade of
//! DOM selection strategies against the live page, and normalizes whatever
//! markup it finds into uniform job records.

mod browser;
pub mod browser_setup;
pub mod extract;
mod utils;

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub browser: BrowserConfig,

    #[serde(default)]
    pub waits: WaitConfig,

    #[serde(default)]
    pub scroll: ScrollConfig,

    /// Candidates whose title has this many characters or fewer are dropped.
    #[serde(default = "default_min_title_chars")]
    pub min_title_chars: usize,
}

/// Browser security and launch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// Run browser in headless mode
    #[serde(default = "default_headless")]
    pub headless: bool,

    /// Disable web security features (Same-Origin Policy, etc.)
    /// WARNING: Only enable for trusted content
    #[serde(default = "default_disable_security")]
    pub disable_security: bool,

    /// Window dimensions
    #[serde(default)]
    pub window: WindowConfig,

    /// User agent presented to target sites
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_window_width")]
    pub width: u32,

    #[serde(default = "default_window_height")]
    pub height: u32,
}

/// Wait stages of the extraction pipeline.
///
/// The settle delays are acknowledged heuristics: client-side rendering
/// frameworks keep painting after the load signal fires, so the pipeline
/// waits a fixed period rather than chasing framework-specific readiness
/// signals. All values are milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitConfig {
    /// Hard ceiling on navigation; exceeding it fails the run.
    #[serde(default = "default_navigation_timeout_ms")]
    pub navigation_timeout_ms: u64,

    /// Unconditional delay after the page load completes.
    #[serde(default = "default_post_load_settle_ms")]
    pub post_load_settle_ms: u64,

    /// Unconditional delay after the scroll trigger finishes.
    #[serde(default = "default_post_scroll_settle_ms")]
    pub post_scroll_settle_ms: u64,

    /// Deadline for the advisory listing-presence probe. A probe timeout
    /// is tolerated; extraction proceeds regardless.
    #[serde(default = "default_selector_probe_ms")]
    pub selector_probe_ms: u64,
}

/// Progressive-scroll tuning for lazy-loaded listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Pixels per scroll step.
    #[serde(default = "default_scroll_step_px")]
    pub step_px: u64,

    /// Pause between scroll steps, milliseconds.
    #[serde(default = "default_scroll_interval_ms")]
    pub interval_ms: u64,

    /// Hard cap on cumulative scrolled distance. Infinite-scroll pages grow
    /// scrollHeight without bound; the cap guarantees termination.
    #[serde(default = "default_scroll_max_total_px")]
    pub max_total_px: u64,
}

fn default_min_title_chars() -> usize {
    3
}

fn default_headless() -> bool {
    true
}

fn default_disable_security() -> bool {
    false // SECURE BY DEFAULT
}

fn default_window_width() -> u32 {
    1280
}

fn default_window_height() -> u32 {
    720
}

fn default_user_agent() -> String {
    crate::utils::constants::CHROME_USER_AGENT.to_string()
}

fn default_navigation_timeout_ms() -> u64 {
    30_000
}

fn default_post_load_settle_ms() -> u64 {
    3_000
}

fn default_post_scroll_settle_ms() -> u64 {
    2_000
}

fn default_selector_probe_ms() -> u64 {
    15_000
}

fn default_scroll_step_px() -> u64 {
    100
}

fn default_scroll_interval_ms() -> u64 {
    100
}

fn default_scroll_max_total_px() -> u64 {
    3_000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browser: BrowserConfig::default(),
            waits: WaitConfig::default(),
            scroll: ScrollConfig::default(),
            min_title_chars: default_min_title_chars(),
        }
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: default_headless(),
            disable_security: default_disable_security(),
            window: WindowConfig::default(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_window_width(),
            height: default_window_height(),
        }
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            navigation_timeout_ms: default_navigation_timeout_ms(),
            post_load_settle_ms: default_post_load_settle_ms(),
            post_scroll_settle_ms: default_post_scroll_settle_ms(),
            selector_probe_ms: default_selector_probe_ms(),
        }
    }
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            step_px: default_scroll_step_px(),
            interval_ms: default_scroll_interval_ms(),
            max_total_px: default_scroll_max_total_px(),
        }
    }
}

/// Load config from config.yaml in package root
pub fn load_yaml_config() -> anyhow::Result<Config> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("config.yaml");

    if config_path.exists() {
        let contents = fs::read_to_string(&config_path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    } else {
        Ok(Config::default())
    }
}

pub use browser::{BrowserError, BrowserResult, BrowserWrapper};
pub use extract::{ExtractionResult, JobRecord, JobScraper, ScrapeError, SiteProfile};
