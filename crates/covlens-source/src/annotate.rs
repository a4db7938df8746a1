//! In-place annotation of an existing listing.
//!
//! Only the opening `<tr>` tag of a flagged row is rewritten; every other
//! byte of the listing is copied through unchanged.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use covlens_tree::{Direction, Node};
use log::debug;
use regex::Regex;

use crate::SourceError;
use crate::html::{UNDEFINED, color_class, escape_html, tooltip};

static ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)(<tr\b[^>]*>)(.*?</tr>)"#).expect("valid regex literal"));

static ANCHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<a\s+name="(\d+)""#).expect("valid regex literal"));

static ATTRIBUTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([A-Za-z][\w:-]*)\s*=\s*"([^"]*)""#).expect("valid regex literal"));

/// Mark the rows of `lines` with their coverage class plus `modified`.
pub fn annotate_modified_lines(html: &str, file: &Node, lines: &BTreeSet<u32>) -> Result<String, SourceError> {
    rewrite(html, file, lines.iter().copied(), |line| {
        lines.contains(&line).then_some("modified")
    })
}

/// Mark the rows of `changes` with their coverage class plus
/// `indirect-increase` or `indirect-decrease`.
pub fn annotate_indirect_changes(
    html: &str,
    file: &Node,
    changes: &BTreeMap<u32, Direction>,
) -> Result<String, SourceError> {
    rewrite(html, file, changes.keys().copied(), |line| {
        changes.get(&line).map(|direction| match direction {
            Direction::Increased => "indirect-increase",
            Direction::Decreased => "indirect-decrease",
        })
    })
}

fn rewrite(
    html: &str,
    file: &Node,
    flagged: impl Iterator<Item = u32>,
    marker: impl Fn(u32) -> Option<&'static str>,
) -> Result<String, SourceError> {
    let mut out = String::with_capacity(html.len());
    let mut last = 0;
    let mut seen = BTreeSet::new();

    for row in ROW.captures_iter(html) {
        let (Some(whole), Some(open), Some(rest)) = (row.get(0), row.get(1), row.get(2)) else {
            continue;
        };
        let Some(line) = row_line(rest.as_str()) else {
            continue;
        };
        let Some(mark) = marker(line) else {
            continue;
        };
        seen.insert(line);
        out.push_str(&html[last..whole.start()]);
        out.push_str(&open_tag(open.as_str(), file, line, mark));
        out.push_str(rest.as_str());
        last = whole.end();
    }
    out.push_str(&html[last..]);

    for line in flagged {
        if !seen.contains(&line) {
            return Err(SourceError::MissingLine {
                path: file.file_path().to_string(),
                line,
            });
        }
    }

    debug!("{}: annotated {} rows", file.file_path(), seen.len());
    Ok(out)
}

fn row_line(row: &str) -> Option<u32> {
    ANCHOR.captures(row)?.get(1)?.as_str().parse().ok()
}

/// The row's opening tag with a new `class` and tooltip; other attributes
/// keep their order and values.
fn open_tag(open: &str, file: &Node, line: u32, mark: &str) -> String {
    let counters = file.lines.get(&line).copied().filter(|c| c.total() > 0);
    let class = counters.map_or(UNDEFINED, color_class);

    let mut tag = format!(r#"<tr class="{class} {mark}""#);
    if let Some(counters) = counters {
        tag.push_str(&format!(r#" data-html-tooltip="{}""#, escape_html(&tooltip(counters))));
    }
    for attribute in ATTRIBUTE.captures_iter(open) {
        let (Some(name), Some(value)) = (attribute.get(1), attribute.get(2)) else {
            continue;
        };
        if matches!(name.as_str(), "class" | "data-html-tooltip") {
            continue;
        }
        tag.push_str(&format!(r#" {}="{}""#, name.as_str(), value.as_str()));
    }
    tag.push('>');
    tag
}
