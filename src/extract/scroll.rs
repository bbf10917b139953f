//! Lazy-content scroll trigger
//!
//! Progressive career pages only materialize listings as the viewport
//! approaches them. The trigger steps the window down until it has
//! covered the page's scrollable height or exhausted the distance cap.
//! scrollHeight can grow without bound on infinite-scroll pages; the cap
//! guarantees termination.

use chromiumoxide::Page;
use chromiumoxide_cdp::cdp::js_protocol::runtime::{CallArgument, CallFunctionOnParams};
use serde_json::json;
use tracing::{debug, warn};

use crate::ScrollConfig;

/// Scroll the page stepwise to force lazy-loaded listings into the DOM.
///
/// Side effect only. Evaluation errors end the scroll early but never
/// propagate; a half-scrolled page is still worth extracting from.
pub async fn trigger_lazy_load(page: &Page, config: &ScrollConfig) {
    let interval = std::time::Duration::from_millis(config.interval_ms);
    let mut scrolled: u64 = 0;

    loop {
        // Parameterized evaluation, same as interactive scrolling elsewhere
        let call = match CallFunctionOnParams::builder()
            .function_declaration("(step) => window.scrollBy(0, step)")
            .argument(CallArgument::builder().value(json!(config.step_px)).build())
            .build()
        {
            Ok(call) => call,
            Err(e) => {
                warn!("Failed to build scroll params: {}", e);
                return;
            }
        };

        if let Err(e) = page.evaluate_function(call).await {
            warn!("Scroll step failed, stopping early: {}", e);
            return;
        }
        scrolled += config.step_px;

        let scroll_height = match page.evaluate("document.body.scrollHeight").await {
            Ok(result) => match result.into_value::<f64>() {
                Ok(height) => height as u64,
                Err(e) => {
                    warn!("Could not read scrollHeight, stopping early: {}", e);
                    return;
                }
            },
            Err(e) => {
                warn!("Could not read scrollHeight, stopping early: {}", e);
                return;
            }
        };

        if budget_reached(scrolled, scroll_height, config.max_total_px) {
            debug!(scrolled, scroll_height, "scroll trigger complete");
            return;
        }

        tokio::time::sleep(interval).await;
    }
}

/// Termination rule: the trigger stops once it has covered the page's
/// current scrollable height, or once cumulative distance hits the cap.
fn budget_reached(scrolled: u64, scroll_height: u64, cap: u64) -> bool {
    scrolled >= scroll_height || scrolled >= cap
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stops_at_the_cap_on_effectively_infinite_pages() {
        let cap = 3_000;
        let mut scrolled = 0;
        while !budget_reached(scrolled, 10_000_000, cap) {
            scrolled += 100;
        }
        assert_eq!(scrolled, cap);
    }

    #[test]
    fn stops_when_the_page_is_covered() {
        assert!(budget_reached(900, 900, 3_000));
        assert!(!budget_reached(800, 900, 3_000));
    }

    #[test]
    fn cap_and_height_are_both_sufficient_alone() {
        assert!(budget_reached(3_000, u64::MAX, 3_000));
        assert!(budget_reached(500, 400, 3_000));
    }
}
