//! Generic extraction profile
//!
//! Covers career pages with no recognized platform. Nine selector
//! patterns walk the common job/career/position/opening naming
//! conventions, from precise href hints down to loose class-name
//! matches. Candidates may be anchors or whole listing containers.

use crate::extract::cascade::{SelectorStrategy, js_string};

pub const STRATEGIES: &[SelectorStrategy] = &[
    SelectorStrategy {
        name: "href-job",
        selector: r#"a[href*="job"]"#,
    },
    SelectorStrategy {
        name: "href-career",
        selector: r#"a[href*="career"]"#,
    },
    SelectorStrategy {
        name: "href-position",
        selector: r#"a[href*="position"]"#,
    },
    SelectorStrategy {
        name: "href-opening",
        selector: r#"a[href*="opening"]"#,
    },
    SelectorStrategy {
        name: "data-job-id",
        selector: "[data-job-id]",
    },
    SelectorStrategy {
        name: "data-testid",
        selector: r#"[data-testid*="job"]"#,
    },
    SelectorStrategy {
        name: "class-job-card",
        selector: r#"[class*="job-card"]"#,
    },
    SelectorStrategy {
        name: "class-job-listing",
        selector: r#"[class*="job-listing"]"#,
    },
    SelectorStrategy {
        name: "class-job-item",
        selector: r#"[class*="job-item"]"#,
    },
];

/// In-page recipe for arbitrary candidates.
///
/// Title: first non-empty descendant among headings, title-classed
/// elements and anchors; a candidate that is itself an anchor falls back
/// to its own text. Location: first non-empty of four class/attribute
/// probes. Link: the candidate's own href when it is a link, else its
/// first descendant link; the host substitutes the page URL when both
/// are absent.
pub fn harvest_script(selector: &str) -> String {
    format!(
        r#"(() => {{
    const nodes = Array.from(document.querySelectorAll({selector}));
    return nodes.map((el) => {{
        let title = '';
        for (const tSel of ['h2', 'h3', 'h4', '[class*="title"]', 'a']) {{
            const hit = el.querySelector(tSel);
            if (hit && hit.textContent.trim()) {{
                title = hit.textContent;
                break;
            }}
        }}
        if (!title.trim() && el.tagName === 'A') {{
            title = el.textContent || '';
        }}
        let location = null;
        for (const lSel of ['[class*="location"]', '[class*="city"]', '[data-location]', '[class*="region"]']) {{
            const hit = el.querySelector(lSel);
            if (hit && hit.textContent.trim()) {{
                location = hit.textContent;
                break;
            }}
        }}
        let href = null;
        if (el.tagName === 'A' && el.href) {{
            href = el.href;
        }} else {{
            const link = el.querySelector('a[href]');
            if (link) {{
                href = link.href;
            }}
        }}
        return {{ title: title, location: location, context: null, href: href }};
    }});
}})()"#,
        selector = js_string(selector)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn href_patterns_come_before_class_patterns() {
        let hrefs = STRATEGIES
            .iter()
            .take_while(|s| s.selector.starts_with("a[href"))
            .count();
        assert_eq!(hrefs, 4);
    }

    #[test]
    fn script_embeds_the_selector_escaped() {
        let script = harvest_script(STRATEGIES[4].selector);
        assert!(script.contains(r#"querySelectorAll("[data-job-id]")"#));
    }
}
