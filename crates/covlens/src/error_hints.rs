use anyhow::Error;

pub(crate) fn format(err: &Error) -> String {
    let mut out = format!("Error: {err:#}");
    let hints = suggestions(err);
    if !hints.is_empty() {
        out.push_str("\n\nHints:\n");
        for hint in hints {
            out.push_str("- ");
            out.push_str(&hint);
            out.push('\n');
        }
    }
    out
}

fn suggestions(err: &Error) -> Vec<String> {
    let chain: Vec<String> = err.chain().map(|e| e.to_string()).collect();
    let haystack = chain.join(" | ").to_ascii_lowercase();
    let mut out: Vec<String> = Vec::new();

    if haystack.contains("no such file or directory") || haystack.contains("cannot find the") {
        push_hint(&mut out, "Verify the input path exists and is readable.");
        push_hint(
            &mut out,
            "Use an absolute path to avoid working-directory confusion.",
        );
    }

    if haystack.contains("failed to parse json") {
        push_hint(
            &mut out,
            "Coverage trees are JSON objects with `name`, `kind` and optional `path`, `values`, `lines` and `children`.",
        );
    }

    if haystack.contains("duplicate child") || haystack.contains("cannot be nested") {
        push_hint(
            &mut out,
            "The coverage tree is malformed; regenerate it from the coverage report.",
        );
    }

    if haystack.contains("toml") || haystack.contains("failed to load configuration") {
        push_hint(
            &mut out,
            "Check `covlens.toml` syntax and key names, or pass another file with `--config`.",
        );
    }

    if haystack.contains("is not part of the coverage tree") {
        push_hint(
            &mut out,
            "Pass the file path exactly as recorded in the tree (`path`, or `name` when no path is set).",
        );
    }

    if haystack.contains("listing has no row") {
        push_hint(
            &mut out,
            "Re-render the listing with `covlens render` from the same source revision.",
        );
    }

    out
}

fn push_hint(out: &mut Vec<String>, hint: &str) {
    if !out.iter().any(|h| h == hint) {
        out.push(hint.to_string());
    }
}
