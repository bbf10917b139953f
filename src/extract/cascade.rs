//! First-match-wins strategy cascade
//!
//! Both profiles walk their selector lists through the same combinator:
//! evaluate strategies in order, stop at the first one that yields
//! candidates. Later strategies are never evaluated once an earlier one
//! matched, even if they would also match.

use std::future::Future;

use tracing::debug;

use crate::extract::types::{RawCandidate, ScrapeError};

/// One DOM selection step of a profile's cascade.
#[derive(Debug, Clone, Copy)]
pub struct SelectorStrategy {
    /// Short label used in logs.
    pub name: &'static str,
    /// CSS selector locating candidate elements.
    pub selector: &'static str,
}

/// Walk `strategies` in order; the first yielding at least one candidate
/// wins. Returns an empty vec when the whole cascade came up dry.
///
/// `probe` runs one strategy against the live page. An evaluation error
/// aborts the cascade: a page whose DOM cannot be queried will not
/// produce anything useful from coarser selectors either.
pub async fn run_cascade<F, Fut>(
    strategies: &[SelectorStrategy],
    mut probe: F,
) -> Result<Vec<RawCandidate>, ScrapeError>
where
    F: FnMut(SelectorStrategy) -> Fut,
    Fut: Future<Output = Result<Vec<RawCandidate>, ScrapeError>>,
{
    for strategy in strategies {
        let found = probe(*strategy).await?;
        if !found.is_empty() {
            debug!(
                strategy = strategy.name,
                candidates = found.len(),
                "strategy matched"
            );
            return Ok(found);
        }
        debug!(strategy = strategy.name, "no match, falling through");
    }

    Ok(Vec::new())
}

/// Embed a selector into a harvest script as a JS string literal.
pub(super) fn js_string(s: &str) -> String {
    serde_json::to_string(s).unwrap_or_else(|_| String::from("\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    const STRATEGIES: &[SelectorStrategy] = &[
        SelectorStrategy {
            name: "first",
            selector: "a.first",
        },
        SelectorStrategy {
            name: "second",
            selector: "a.second",
        },
        SelectorStrategy {
            name: "third",
            selector: "a.third",
        },
    ];

    fn candidate(title: &str) -> RawCandidate {
        RawCandidate {
            title: title.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn first_match_stops_the_cascade() {
        let evaluated = RefCell::new(Vec::new());

        let found = run_cascade(STRATEGIES, |strategy| {
            evaluated.borrow_mut().push(strategy.name);
            let result = match strategy.name {
                "first" => vec![],
                // Both later strategies would match; only "second" may run.
                _ => vec![candidate(strategy.name)],
            };
            async move { Ok(result) }
        })
        .await
        .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "second");
        assert_eq!(*evaluated.borrow(), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn dry_cascade_yields_empty() {
        let mut calls = 0;
        let found = run_cascade(STRATEGIES, |_| {
            calls += 1;
            async { Ok(vec![]) }
        })
        .await
        .unwrap();

        assert!(found.is_empty());
        assert_eq!(calls, STRATEGIES.len());
    }

    #[tokio::test]
    async fn evaluation_error_aborts() {
        let result = run_cascade(STRATEGIES, |_| async {
            Err(ScrapeError::Evaluation("detached frame".into()))
        })
        .await;

        assert!(matches!(result, Err(ScrapeError::Evaluation(_))));
    }

    #[test]
    fn js_string_escapes_quotes() {
        assert_eq!(
            js_string(r#"a[data-automation-id="jobTitle"]"#),
            r#""a[data-automation-id=\"jobTitle\"]""#
        );
    }
}
