//! Comment normalizer. Turns raw `'` / `rem` comment text into JSDoc block
//! lines.

use crate::model::Comment;
use regex::Regex;
use std::sync::LazyLock;

/// Opens every documentation block.
pub const BLOCK_OPEN: &str = "/**";
/// Closes every documentation block.
pub const BLOCK_CLOSE: &str = " */";

static RE_COMMENT_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[[:space:]]*(?:'|rem\b)[[:space:]]*\**[[:space:]]*(.*)").unwrap());

static RE_JS_BLOCK_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[[:space:]]*(?:/\*+)?[[:space:]]*(.*)").unwrap());

static RE_BLOCK_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*+/[[:space:]]*").unwrap());

/// Strip the comment marker (and any leading asterisks) from one line.
fn strip_marker(line: &str) -> String {
    RE_COMMENT_MARKER.replace(line, "$1").trim().to_string()
}

/// Replace markup-significant characters with entities.
pub fn escape_html(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    for c in line.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Convert a comment into the opening lines of a documentation block.
///
/// The result starts with [`BLOCK_OPEN`] and never contains a block close;
/// closing is up to the caller. `@module` lines are dropped since the module
/// tag is emitted once per file by the converter.
pub fn normalize(comment: Option<&Comment>, escape: bool) -> Vec<String> {
    let mut lines = vec![BLOCK_OPEN.to_string()];
    let Some(comment) = comment else {
        return lines;
    };

    let cleaned = comment
        .text
        .split('\n')
        .map(strip_marker)
        .filter(|line| !line.contains("@module"));

    for (i, line) in cleaned.enumerate() {
        let mut line = if i == 0 {
            RE_JS_BLOCK_START.replace(&line, "$1").to_string()
        } else {
            line
        };
        line = RE_BLOCK_END.replace_all(&line, "").to_string();
        if escape {
            line = escape_html(&line);
        }
        lines.push(format!(" * {}", line).trim_end().to_string());
    }
    lines
}

/// Single-line description for `@property` tags: the comment's lines with
/// markers stripped, joined by spaces.
pub fn describe(comment: Option<&Comment>, escape: bool) -> String {
    let Some(comment) = comment else {
        return String::new();
    };
    let text = comment
        .text
        .split('\n')
        .map(strip_marker)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let text = RE_BLOCK_END.replace_all(&text, "").to_string();
    if escape {
        escape_html(&text)
    } else {
        text
    }
}
