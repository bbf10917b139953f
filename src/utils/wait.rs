//! Listing-presence probe for SPA support
//!
//! Career sites rendered client-side attach their listing markup well
//! after the load event fires. The probe polls a handful of candidate
//! selectors with exponential backoff until one resolves or the deadline
//! passes. It is advisory: a timeout is a normal outcome, never an error.

use std::time::Duration;

use chromiumoxide::Page;

/// Wait until any one of `selectors` matches an element in the DOM.
///
/// Polls all selectors round-robin, first to resolve wins. Returns the
/// index of the winning selector, or `None` if the deadline passed with
/// no match. Intervals start at 100ms and double up to a 1 second cap.
pub async fn wait_for_any_selector(
    page: &Page,
    selectors: &[&str],
    timeout: Duration,
) -> Option<usize> {
    let start = std::time::Instant::now();
    let mut poll_interval = Duration::from_millis(100);
    let max_interval = Duration::from_secs(1);

    loop {
        for (idx, selector) in selectors.iter().enumerate() {
            if page.find_element(*selector).await.is_ok() {
                return Some(idx);
            }
        }

        if start.elapsed() >= timeout {
            return None;
        }

        tokio::time::sleep(poll_interval).await;
        poll_interval = (poll_interval * 2).min(max_interval);
    }
}
