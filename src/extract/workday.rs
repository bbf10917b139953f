//! Workday-family extraction profile
//!
//! Workday tenants render their job lists client-side and tag the title
//! anchors with automation-id attributes. The cascade starts from that
//! marker and degrades toward progressively coarser anchor heuristics.

use crate::extract::cascade::{SelectorStrategy, js_string};

pub const STRATEGIES: &[SelectorStrategy] = &[
    SelectorStrategy {
        name: "automation-id",
        selector: r#"a[data-automation-id="jobTitle"]"#,
    },
    SelectorStrategy {
        name: "job-path",
        selector: r#"a[href*="/job/"]"#,
    },
    SelectorStrategy {
        name: "aria-label",
        selector: r#"a[aria-label*="job"]"#,
    },
    SelectorStrategy {
        name: "styled-list-item",
        selector: r#"li[class*="css"] a"#,
    },
];

/// In-page recipe: one raw candidate per matched anchor.
///
/// The title is the anchor's own text. The location comes from the
/// nearest enclosing list item: automation-id marker first, then the
/// definition-description element Workday renders metadata into, then a
/// loose class match. The list item's full text rides along as context
/// for the host-side pattern fallback.
pub fn harvest_script(selector: &str) -> String {
    format!(
        r#"(() => {{
    const anchors = Array.from(document.querySelectorAll({selector}));
    return anchors.map((a) => {{
        const item = a.closest('li');
        let location = null;
        if (item) {{
            for (const locSel of ['[data-automation-id="locations"]', 'dd', '[class*="location"]']) {{
                const hit = item.querySelector(locSel);
                if (hit && hit.textContent.trim()) {{
                    location = hit.textContent;
                    break;
                }}
            }}
        }}
        return {{
            title: a.textContent || '',
            location: location,
            context: item ? item.textContent : null,
            href: a.href || null
        }};
    }});
}})()"#,
        selector = js_string(selector)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_embeds_the_selector_escaped() {
        let script = harvest_script(STRATEGIES[0].selector);
        assert!(script.contains(r#"querySelectorAll("a[data-automation-id=\"jobTitle\"]")"#));
    }

    #[test]
    fn script_tries_the_automation_marker_before_dd() {
        let script = harvest_script("a");
        let automation = script.find(r#"[data-automation-id="locations"]"#).unwrap();
        let dd = script.find("'dd'").unwrap();
        assert!(automation < dd);
    }
}
