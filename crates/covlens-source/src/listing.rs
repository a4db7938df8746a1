use covlens_tree::Node;
use log::debug;

use crate::html::{UNDEFINED, cleanup_code, color_class, summary_column, tooltip};

/// Render `source` as table rows, one per line, painted with the counters of
/// `file`:
///
/// ```text
/// <tr class="coverFull" data-html-tooltip="Covered at least once"><td class="line"><a name="3">3</a></td><td class="hits">1</td><td class="code">...</td></tr>
/// ```
///
/// Lines without counters get class `noCover`, no tooltip and an empty hits
/// column. Rows are separated by a newline.
#[must_use]
pub fn render_listing(file: &Node, source: &str) -> String {
    let rows: Vec<String> = source
        .lines()
        .zip(1u32..)
        .map(|(code, line)| render_row(file, line, code))
        .collect();
    debug!("{}: rendered {} rows", file.file_path(), rows.len());
    rows.join("\n")
}

fn render_row(file: &Node, line: u32, code: &str) -> String {
    let painted = file.lines.get(&line).copied().filter(|c| c.total() > 0);
    let (open, hits) = match painted {
        Some(counters) => (
            format!(
                r#"<tr class="{}" data-html-tooltip="{}">"#,
                color_class(counters),
                tooltip(counters)
            ),
            summary_column(counters),
        ),
        None => (format!(r#"<tr class="{UNDEFINED}">"#), String::new()),
    };
    format!(
        r#"{open}<td class="line"><a name="{line}">{line}</a></td><td class="hits">{hits}</td><td class="code">{code}</td></tr>"#,
        code = cleanup_code(code)
    )
}
