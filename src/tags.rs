//! Tag extractor. Pulls `@param`, `@returns`, `@extends` and `@module` out
//! of normalized comment lines.
//!
//! Extraction is a fold: each function takes the pending lines and returns
//! the lines that remain together with what was found, so consuming one
//! parameter's lines never depends on the order other parameters are looked
//! up in.
//!
//! Parameter pattern precedence: the typed form
//! `@param {Type} name description` is tried first, then the untyped form
//! `@param name description`. A bracketed name (`[name=default]`) marks an
//! optional parameter; only the bare name is compared.

use regex::Regex;
use std::sync::LazyLock;

static RE_PARAM_TYPED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"@param[[:space:]]+(?:\{([^}]*)\})?[[:space:]]+",
        r"(?:\[(\w+[$%!#&]?).*\]|(\w+[$%!#&]?))[[:space:]\-|]*(.*)"
    ))
    .unwrap()
});

static RE_PARAM_UNTYPED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"@param[[:space:]]+(?:\[(\w+[$%!#&]?).*\]|(\w+[$%!#&]?))[[:space:]\-|]*(.*)").unwrap()
});

static RE_RETURNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@returns?[[:space:]]*(\{[^}]*\})?[[:space:]]*(.*)").unwrap());

static RE_EXTENDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@extends(?:[[:space:]]+(\S+))?").unwrap());

static RE_MODULE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@module ([^*[:space:]]+)").unwrap());

/// What a comment says about one parameter.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParamDoc {
    pub type_name: Option<String>,
    pub description: Option<String>,
}

/// What a comment says about the return value.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReturnDoc {
    pub type_name: Option<String>,
    pub description: Option<String>,
}

fn non_empty(text: Option<regex::Match<'_>>) -> Option<String> {
    text.map(|m| m.as_str().to_string())
        .filter(|s| !s.trim().is_empty())
}

/// Parse one line as a `@param` tag: (name, type, description).
fn param_tag(line: &str) -> Option<(String, Option<String>, Option<String>)> {
    if let Some(caps) = RE_PARAM_TYPED.captures(line) {
        let name = caps.get(2).or_else(|| caps.get(3))?.as_str().to_string();
        let type_name = non_empty(caps.get(1)).map(|t| t.trim().to_string());
        return Some((name, type_name, non_empty(caps.get(4))));
    }
    let caps = RE_PARAM_UNTYPED.captures(line)?;
    let name = caps.get(1).or_else(|| caps.get(2))?.as_str().to_string();
    Some((name, None, non_empty(caps.get(3))))
}

/// Consume every `@param` line documenting `name` (compared trimmed and
/// case-insensitively). When several lines document the same parameter the
/// last one wins.
pub fn extract_param(lines: Vec<String>, name: &str) -> (Vec<String>, ParamDoc) {
    let wanted = name.trim().to_lowercase();
    lines
        .into_iter()
        .fold((Vec::new(), ParamDoc::default()), |(mut rest, mut doc), line| {
            match param_tag(&line) {
                Some((tag_name, type_name, description))
                    if tag_name.trim().to_lowercase() == wanted =>
                {
                    doc = ParamDoc {
                        type_name,
                        description,
                    };
                }
                _ => rest.push(line),
            }
            (rest, doc)
        })
}

/// Consume every `@returns` / `@return` line; the first one supplies the
/// documented type and description.
///
/// A documented type is kept verbatim even when it differs from the declared
/// return type, so authors can name aliases the code cannot express.
pub fn extract_returns(lines: Vec<String>) -> (Vec<String>, Option<ReturnDoc>) {
    lines
        .into_iter()
        .fold((Vec::new(), None), |(mut rest, found), line| {
            match RE_RETURNS.captures(&line) {
                Some(caps) => {
                    let doc = found.or_else(|| {
                        Some(ReturnDoc {
                            type_name: caps.get(1).map(|m| {
                                m.as_str()
                                    .trim_start_matches('{')
                                    .trim_end_matches('}')
                                    .trim()
                                    .to_string()
                            }),
                            description: non_empty(caps.get(2)),
                        })
                    });
                    (rest, doc)
                }
                None => {
                    rest.push(line);
                    (rest, found)
                }
            }
        })
}

/// Remove the first `@extends` line that names no parent, so a generated
/// `@extends Parent` is not doubled by an empty authored one. Lines that do
/// name a parent stay.
pub fn strip_bare_extends(mut lines: Vec<String>) -> Vec<String> {
    let bare = lines.iter().position(|line| {
        RE_EXTENDS
            .captures(line)
            .map(|caps| caps.get(1).is_none())
            .unwrap_or(false)
    });
    if let Some(index) = bare {
        lines.remove(index);
    }
    lines
}

/// `@module name` declared anywhere in the source.
pub fn module_tag(source: &str) -> Option<&str> {
    RE_MODULE
        .captures(source)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Tidy a parameter or return description: trimmed, one leading comma
/// dropped, dash-prefixed text left alone.
pub fn describe(text: &str) -> String {
    let text = text.trim();
    if text.starts_with('-') {
        return text.to_string();
    }
    text.strip_prefix(',').unwrap_or(text).trim_start().to_string()
}
