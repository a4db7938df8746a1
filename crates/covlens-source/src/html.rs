//! Row-level HTML helpers shared by rendering and annotation.

use covlens_tree::LineCounters;

pub(crate) const UNDEFINED: &str = "noCover";
pub(crate) const NO_COVERAGE: &str = "coverNone";
pub(crate) const FULL_COVERAGE: &str = "coverFull";
pub(crate) const PARTIAL_COVERAGE: &str = "coverPart";

const NBSP: &str = "&nbsp;";

#[must_use]
pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Escaped code with line breaks removed and whitespace kept visible.
pub(crate) fn cleanup_code(code: &str) -> String {
    escape_html(code)
        .replace(['\n', '\r'], "")
        .replace(' ', NBSP)
        .replace('\t', &NBSP.repeat(8))
}

/// `coverFull`, `coverPart` or `coverNone`.
#[must_use]
pub fn color_class(counters: LineCounters) -> &'static str {
    if counters.covered == 0 {
        NO_COVERAGE
    } else if counters.missed == 0 {
        FULL_COVERAGE
    } else {
        PARTIAL_COVERAGE
    }
}

#[must_use]
pub fn tooltip(counters: LineCounters) -> String {
    let LineCounters { covered, missed } = counters;
    if counters.has_branches() {
        if missed == 0 {
            "All branches covered".to_string()
        } else if covered == 0 {
            "No branches covered".to_string()
        } else {
            format!("Partially covered, branch coverage: {covered}/{}", counters.total())
        }
    } else if covered == 1 {
        "Covered at least once".to_string()
    } else {
        "Not covered".to_string()
    }
}

/// `c/t` for branch lines, the covered count otherwise.
#[must_use]
pub fn summary_column(counters: LineCounters) -> String {
    if counters.has_branches() {
        format!("{}/{}", counters.covered, counters.total())
    } else {
        counters.covered.to_string()
    }
}
