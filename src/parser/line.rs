//! Line-level recognizers for the declaration parser.

use crate::model::{BuiltinType, Expression, TypeRef};
use regex::Regex;
use std::sync::LazyLock;

// -- Regex patterns -----------------------------------------------------------

static RE_COMMENT_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[[:space:]]*(?:'|rem(?:[[:space:]]|$))").unwrap());

static RE_BLANK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[[:space:]]*$").unwrap());

pub static RE_ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[[:space:]]*@([A-Za-z_][A-Za-z0-9_]*)").unwrap());

pub static RE_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[[:space:]]*end[[:space:]]*(function|sub|class|interface|enum|namespace)\b")
        .unwrap()
});

// [access] [override] function|sub name(params) [as type]
pub static RE_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^[[:space:]]*(?:(public|protected|private)[[:space:]]+)?",
        r"(?:(override)[[:space:]]+)?",
        r"(function|sub)[[:space:]]+([A-Za-z_][A-Za-z0-9_]*[$%!#&]?)[[:space:]]*",
        r"\((.*)\)[[:space:]]*",
        r"(?:as[[:space:]]+([A-Za-z_][A-Za-z0-9_.]*))?[[:space:]]*$"
    ))
    .unwrap()
});

pub static RE_FUNCTION_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^[[:space:]]*(?:(?:public|protected|private)[[:space:]]+)?",
        r"(?:override[[:space:]]+)?(?:function|sub)[[:space:]]+[A-Za-z_]"
    ))
    .unwrap()
});

static RE_ANONYMOUS_FUNCTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:function|sub)[[:space:]]*\(").unwrap());

static RE_FUNCTION_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bend[[:space:]]*(?:function|sub)\b").unwrap());

static RE_STRING_LITERAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#""[^"]*""#).unwrap());

pub static RE_CLASS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^[[:space:]]*class[[:space:]]+([A-Za-z_][A-Za-z0-9_]*)",
        r"(?:[[:space:]]+extends[[:space:]]+([A-Za-z_][A-Za-z0-9_.]*))?[[:space:]]*$"
    ))
    .unwrap()
});

pub static RE_INTERFACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^[[:space:]]*interface[[:space:]]+([A-Za-z_][A-Za-z0-9_]*)",
        r"(?:[[:space:]]+extends[[:space:]]+([A-Za-z_][A-Za-z0-9_.]*))?[[:space:]]*$"
    ))
    .unwrap()
});

pub static RE_ENUM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[[:space:]]*enum[[:space:]]+([A-Za-z_][A-Za-z0-9_]*)[[:space:]]*$").unwrap()
});

pub static RE_NAMESPACE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[[:space:]]*namespace[[:space:]]+([A-Za-z_][A-Za-z0-9_.]*[A-Za-z0-9_])[[:space:]]*$")
        .unwrap()
});

pub static RE_CONST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[[:space:]]*const[[:space:]]+([A-Za-z_][A-Za-z0-9_]*)[[:space:]]*=[[:space:]]*(.+?)[[:space:]]*$")
        .unwrap()
});

// Keyword that opens a BrighterScript-only declaration
pub static RE_BS_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[[:space:]]*(class|interface|enum|namespace|const)(?:[[:space:]]|$)").unwrap()
});

// [access] name [as type] [= value]
pub static RE_CLASS_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^[[:space:]]*(?:(public|protected|private)[[:space:]]+)?",
        r"([A-Za-z_][A-Za-z0-9_]*[$%!#&]?)[[:space:]]*",
        r"(?:as[[:space:]]+([A-Za-z_][A-Za-z0-9_.]*))?[[:space:]]*",
        r"(?:=[[:space:]]*(.+?))?[[:space:]]*$"
    ))
    .unwrap()
});

pub static RE_INTERFACE_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^[[:space:]]*(?:optional[[:space:]]+)?([A-Za-z_][A-Za-z0-9_]*)",
        r"(?:[[:space:]]+as[[:space:]]+([A-Za-z_][A-Za-z0-9_.]*))?[[:space:]]*$"
    ))
    .unwrap()
});

pub static RE_ENUM_MEMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[[:space:]]*([A-Za-z_][A-Za-z0-9_]*)[[:space:]]*(?:=[[:space:]]*(.+?))?[[:space:]]*$")
        .unwrap()
});

// name [= default] [as type]
static RE_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^[[:space:]]*([A-Za-z_][A-Za-z0-9_]*[$%!#&]?)[[:space:]]*",
        r"(?:=[[:space:]]*(.+?))?[[:space:]]*",
        r"(?:as[[:space:]]+([A-Za-z_][A-Za-z0-9_.]*))?[[:space:]]*$"
    ))
    .unwrap()
});

static RE_STRING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"^"(?:[^"]|"")*"$"#).unwrap());

static RE_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[0-9]+|&[hH][0-9A-Fa-f]+)(&)?$").unwrap());

static RE_FLOAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[0-9]+\.[0-9]*|\.[0-9]+|[0-9]+(?:\.[0-9]*)?[eE][+-]?[0-9]+)([!#])?$").unwrap()
});

static RE_BOOLEAN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^(?:true|false)$").unwrap());

static RE_INVALID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^invalid$").unwrap());

// -- Helpers ------------------------------------------------------------------

pub fn is_comment(line: &str) -> bool {
    RE_COMMENT_LINE.is_match(line)
}

pub fn is_blank(line: &str) -> bool {
    RE_BLANK.is_match(line)
}

/// Column of the first non-whitespace character.
pub fn indent(line: &str) -> usize {
    line.len() - line.trim_start().len()
}

/// Split a code line into its code part and an optional trailing `'` comment
/// (with the comment's starting column). Apostrophes inside string literals
/// do not start a comment.
pub fn split_trailing_comment(line: &str) -> (&str, Option<(usize, &str)>) {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '\'' if !in_string => return (&line[..i], Some((i, &line[i..]))),
            _ => {}
        }
    }
    (line, None)
}

/// Number of `end function` / `end sub` keywords on a body line.
pub fn function_ends(code: &str) -> usize {
    let stripped = RE_STRING_LITERAL.replace_all(code, "\"\"");
    RE_FUNCTION_END.find_iter(&stripped).count()
}

/// Number of anonymous `function(`/`sub(` literals opened on a body line.
pub fn anonymous_functions(code: &str) -> usize {
    let stripped = RE_STRING_LITERAL.replace_all(code, "\"\"");
    RE_ANONYMOUS_FUNCTION.find_iter(&stripped).count()
}

/// Split a parameter list on top-level commas.
pub fn split_params(list: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut start = 0;
    for (i, c) in list.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '(' | '[' | '{' if !in_string => depth += 1,
            ')' | ']' | '}' if !in_string => depth = depth.saturating_sub(1),
            ',' if !in_string && depth == 0 => {
                parts.push(&list[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if !list[start..].trim().is_empty() || !parts.is_empty() {
        parts.push(&list[start..]);
    }
    parts
}

/// A parsed parameter: name, default value text, type token.
pub struct ParamParts<'a> {
    pub name: &'a str,
    pub default_value: Option<&'a str>,
    pub type_token: Option<&'a str>,
}

pub fn param_parts(text: &str) -> Option<ParamParts<'_>> {
    let caps = RE_PARAM.captures(text)?;
    Some(ParamParts {
        name: caps.get(1)?.as_str(),
        default_value: caps.get(2).map(|m| m.as_str()),
        type_token: caps.get(3).map(|m| m.as_str()),
    })
}

/// Type named by a trailing designator: `name$`, `count%`, `ratio!`,
/// `total#`, `big&`.
pub fn designated_type(name: &str) -> Option<TypeRef> {
    let builtin = match name.chars().last()? {
        '$' => BuiltinType::String,
        '%' => BuiltinType::Integer,
        '!' => BuiltinType::Float,
        '#' => BuiltinType::Double,
        '&' => BuiltinType::LongInteger,
        _ => return None,
    };
    Some(TypeRef::Builtin(builtin))
}

/// Classify initializer text as a single literal token or something else.
pub fn expression(text: &str) -> Expression {
    let text = text.trim();
    let literal = RE_STRING.is_match(text)
        || RE_INTEGER.is_match(text)
        || RE_FLOAT.is_match(text)
        || RE_BOOLEAN.is_match(text)
        || RE_INVALID.is_match(text);
    if literal {
        Expression::Literal(text.to_string())
    } else {
        Expression::Other(text.to_string())
    }
}

/// Type implied by an initializer. Non-literal initializers are
/// `Uninitialized`; `invalid` says nothing about the type.
pub fn inferred_type(value: &Expression) -> TypeRef {
    let builtin = match value {
        Expression::Other(_) => BuiltinType::Uninitialized,
        Expression::Literal(text) => {
            if RE_STRING.is_match(text) {
                BuiltinType::String
            } else if let Some(caps) = RE_INTEGER.captures(text) {
                if caps.get(1).is_some() {
                    BuiltinType::LongInteger
                } else {
                    BuiltinType::Integer
                }
            } else if let Some(caps) = RE_FLOAT.captures(text) {
                match caps.get(1).map(|m| m.as_str()) {
                    Some("#") => BuiltinType::Double,
                    _ => BuiltinType::Float,
                }
            } else if RE_BOOLEAN.is_match(text) {
                BuiltinType::Boolean
            } else {
                BuiltinType::Dynamic
            }
        }
    };
    TypeRef::Builtin(builtin)
}
