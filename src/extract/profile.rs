//! Site-profile selection
//!
//! A profile bundles one family's selector cascade and harvest recipe.
//! Workday tenants share enough markup across companies to deserve a
//! dedicated profile; every other career site goes through the generic
//! one.

use crate::extract::cascade::SelectorStrategy;
use crate::extract::{generic, workday};

/// URL substrings identifying Workday-hosted career sites: the main
/// domain suffix plus the two regional tenant prefixes seen in practice.
const WORKDAY_MARKERS: [&str; 3] = [
    "myworkdayjobs.com",
    "wd1.myworkdaysite.com",
    "wd5.myworkdaysite.com",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteProfile {
    Workday,
    Generic,
}

impl SiteProfile {
    /// Pick the profile for a target URL. Pure substring test over the
    /// raw URL string; always resolves, touches neither network nor DOM.
    pub fn classify(url: &str) -> Self {
        if WORKDAY_MARKERS.iter().any(|marker| url.contains(marker)) {
            SiteProfile::Workday
        } else {
            SiteProfile::Generic
        }
    }

    /// The profile's selection strategies, in cascade order.
    pub fn strategies(self) -> &'static [SelectorStrategy] {
        match self {
            SiteProfile::Workday => workday::STRATEGIES,
            SiteProfile::Generic => generic::STRATEGIES,
        }
    }

    /// Build the in-page harvest script for one strategy's selector.
    pub fn harvest_script(self, selector: &str) -> String {
        match self {
            SiteProfile::Workday => workday::harvest_script(selector),
            SiteProfile::Generic => generic::harvest_script(selector),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workday_urls_select_workday() {
        for url in [
            "https://acme.wd1.myworkdaysite.com/recruiting/acme/External",
            "https://globex.wd5.myworkdaysite.com/en-US/careers",
            "https://initech.myworkdayjobs.com/External_Careers",
            "https://www.myworkdayjobs.com/somewhere",
        ] {
            assert_eq!(SiteProfile::classify(url), SiteProfile::Workday, "{url}");
        }
    }

    #[test]
    fn other_urls_select_generic() {
        for url in [
            "https://example.com/careers",
            "https://boards.greenhouse.io/acme",
            "https://jobs.lever.co/globex",
            "https://workday.com/",
            "https://acme.wd9.myworkdaysite.com/jobs",
        ] {
            assert_eq!(SiteProfile::classify(url), SiteProfile::Generic, "{url}");
        }
    }

    #[test]
    fn workday_cascade_has_four_anchor_strategies() {
        let strategies = SiteProfile::Workday.strategies();
        assert_eq!(strategies.len(), 4);
        assert_eq!(strategies[0].selector, r#"a[data-automation-id="jobTitle"]"#);
    }

    #[test]
    fn generic_cascade_has_nine_patterns() {
        assert_eq!(SiteProfile::Generic.strategies().len(), 9);
    }
}
