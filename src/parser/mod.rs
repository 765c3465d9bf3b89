//! Declaration parser: a line-oriented reader that turns BrighterScript /
//! BrightScript source into the statement tree of [`crate::model`].
//!
//! Only what the documentation output needs is kept: comments, annotations
//! and declaration headers. Function bodies are skipped by tracking
//! `function`/`end function` nesting.

mod error;
mod line;

pub use error::ParseError;

use crate::model::*;
use line::*;
use regex::Captures;
use tracing::{trace, warn};

/// Parse source text into top-level statements.
pub fn parse(source: &str, mode: ParseMode) -> Result<Vec<Statement>, ParseError> {
    let mut parser = Parser {
        lines: source.lines().collect(),
        pos: 0,
        mode,
        annotations: Vec::new(),
    };
    parser.statements(None)
}

struct Parser<'a> {
    lines: Vec<&'a str>,
    pos: usize,
    mode: ParseMode,
    // Annotations waiting for the declaration below them
    annotations: Vec<Annotation>,
}

/// Block being read and the (0-based) line that opened it.
#[derive(Clone, Copy)]
struct Opened {
    keyword: &'static str,
    line: usize,
}

impl<'a> Parser<'a> {
    /// Read statements until EOF or the `end namespace` closing `opened`.
    fn statements(&mut self, opened: Option<Opened>) -> Result<Vec<Statement>, ParseError> {
        let mut out = Vec::new();

        while let Some(&raw) = self.lines.get(self.pos) {
            if is_blank(raw) {
                self.pos += 1;
                continue;
            }
            if is_comment(raw) {
                out.push(Statement::Comment(self.comment_block()));
                continue;
            }
            if self.annotation(raw) {
                continue;
            }

            let (code, trailing) = split_trailing_comment(raw);

            if let Some(caps) = RE_END.captures(code) {
                let keyword = caps[1].to_ascii_lowercase();
                match opened {
                    Some(block) if block.keyword == "namespace" && keyword == "namespace" => {
                        self.pos += 1;
                        return Ok(out);
                    }
                    _ => {
                        return Err(ParseError::UnexpectedEnd {
                            keyword,
                            line: self.pos + 1,
                        })
                    }
                }
            }

            if let Some(caps) = RE_FUNCTION.captures(code) {
                let func = self.function(&caps, raw)?;
                trace!(name = %func.name, line = func.range.start.line, "function");
                out.push(Statement::Function(func));
                continue;
            }
            if RE_FUNCTION_START.is_match(code) {
                return Err(ParseError::malformed("function declaration", self.pos, code));
            }

            if let Some(caps) = RE_BS_KEYWORD.captures(code) {
                let keyword = caps[1].to_ascii_lowercase();
                self.bs_only(&keyword);
                let stmt = match keyword.as_str() {
                    "class" => Statement::Class(self.class(code, trailing)?),
                    "interface" => Statement::Interface(self.interface(code, trailing)?),
                    "enum" => Statement::Enum(self.enumeration(code, trailing)?),
                    "namespace" => Statement::Namespace(self.namespace(code, trailing)?),
                    _ => {
                        let stmt = Statement::Const(self.constant(code)?);
                        out.push(stmt);
                        if let Some(comment) = self.trailing(trailing) {
                            out.push(Statement::Comment(comment));
                        }
                        self.pos += 1;
                        continue;
                    }
                };
                out.push(stmt);
                continue;
            }

            // Anything else (imports, library statements, stray code) is not
            // documentation material.
            trace!(line = self.pos, "skipping line");
            self.annotations.clear();
            self.pos += 1;
        }

        match opened {
            Some(block) => Err(ParseError::Unterminated {
                keyword: block.keyword.to_string(),
                line: block.line + 1,
            }),
            None => Ok(out),
        }
    }

    /// Merge consecutive full-line comments into one block.
    fn comment_block(&mut self) -> Comment {
        let start = self.pos;
        let mut text = Vec::new();
        while let Some(&raw) = self.lines.get(self.pos) {
            if !is_comment(raw) {
                break;
            }
            text.push(raw.trim());
            self.pos += 1;
        }
        let last = self.pos - 1;
        Comment {
            text: text.join("\n"),
            range: Range::new(
                start,
                indent(self.lines[start]),
                last,
                self.lines[last].trim_end().len(),
            ),
        }
    }

    /// Comment found after code on the current line.
    fn trailing(&self, trailing: Option<(usize, &str)>) -> Option<Comment> {
        let (column, text) = trailing?;
        Some(Comment {
            text: text.trim().to_string(),
            range: Range::new(self.pos, column, self.pos, column + text.trim_end().len()),
        })
    }

    /// Record an annotation line. Returns false when the line is not one.
    fn annotation(&mut self, raw: &str) -> bool {
        let Some(caps) = RE_ANNOTATION.captures(raw) else {
            return false;
        };
        if self.mode == ParseMode::BrightScript {
            warn!(line = self.pos + 1, "annotations are a BrighterScript feature");
        }
        self.annotations.push(Annotation {
            name: caps[1].to_string(),
            range: Range::new(self.pos, indent(raw), self.pos, raw.trim_end().len()),
        });
        self.pos += 1;
        true
    }

    fn bs_only(&self, keyword: &str) {
        if self.mode == ParseMode::BrightScript {
            warn!(
                line = self.pos + 1,
                "'{}' is a BrighterScript feature; parsing it anyway", keyword
            );
        }
    }

    /// Parse a function header at the current line and skip its body.
    fn function(&mut self, caps: &Captures, raw: &str) -> Result<Function, ParseError> {
        let start = self.pos;
        let func = self.signature(caps, raw)?;

        let mut depth = 1usize;
        self.pos += 1;
        while let Some(&body) = self.lines.get(self.pos) {
            if !is_comment(body) {
                let (code, _) = split_trailing_comment(body);
                depth += anonymous_functions(code);
                depth = depth.saturating_sub(function_ends(code));
                if depth == 0 {
                    let range = Range::new(
                        start,
                        indent(raw),
                        self.pos,
                        body.trim_end().len(),
                    );
                    self.pos += 1;
                    return Ok(Function { range, ..func });
                }
            }
            self.pos += 1;
        }

        Err(ParseError::Unterminated {
            keyword: func.kind_keyword().to_string(),
            line: start + 1,
        })
    }

    /// Build a function from its header alone (interface methods have no
    /// body). The range covers the header line.
    fn signature(&mut self, caps: &Captures, raw: &str) -> Result<Function, ParseError> {
        let kind = if caps[3].eq_ignore_ascii_case("sub") {
            FunctionKind::Sub
        } else {
            FunctionKind::Function
        };

        let mut params = Vec::new();
        for text in split_params(&caps[5]) {
            let parts = param_parts(text)
                .ok_or_else(|| ParseError::malformed("parameter", self.pos, text))?;
            let default_value = parts.default_value.map(expression);
            let type_ref = match (parts.type_token, &default_value) {
                (Some(token), _) => Some(TypeRef::from_token(token)),
                (None, value) => {
                    designated_type(parts.name).or_else(|| value.as_ref().map(inferred_type))
                }
            };
            params.push(Param {
                name: parts.name.to_string(),
                type_ref,
                default_value,
            });
        }

        Ok(Function {
            name: caps[4].to_string(),
            kind,
            params,
            return_type: caps
                .get(6)
                .map(|m| TypeRef::from_token(m.as_str()))
                .or_else(|| designated_type(&caps[4])),
            annotations: std::mem::take(&mut self.annotations),
            range: Range::new(self.pos, indent(raw), self.pos, raw.trim_end().len()),
        })
    }

    fn class(
        &mut self,
        code: &str,
        trailing: Option<(usize, &str)>,
    ) -> Result<Class, ParseError> {
        let caps = RE_CLASS
            .captures(code)
            .ok_or_else(|| ParseError::malformed("class declaration", self.pos, code))?;
        let opened = Opened {
            keyword: "class",
            line: self.pos,
        };
        let name = caps[1].to_string();
        let parent = caps.get(2).map(|m| m.as_str().to_string());
        let annotations = std::mem::take(&mut self.annotations);
        let start_col = indent(self.lines[self.pos]);

        let mut body = Vec::new();
        if let Some(comment) = self.trailing(trailing) {
            body.push(ClassMember::Comment(comment));
        }
        self.pos += 1;

        while let Some(&raw) = self.lines.get(self.pos) {
            if is_blank(raw) {
                self.pos += 1;
                continue;
            }
            if is_comment(raw) {
                body.push(ClassMember::Comment(self.comment_block()));
                continue;
            }
            if self.annotation(raw) {
                continue;
            }

            let (code, trailing) = split_trailing_comment(raw);
            if let Some(caps) = RE_END.captures(code) {
                if caps[1].eq_ignore_ascii_case("class") {
                    let range = Range::new(opened.line, start_col, self.pos, raw.trim_end().len());
                    self.pos += 1;
                    return Ok(Class {
                        name,
                        parent,
                        body,
                        annotations,
                        range,
                    });
                }
                return Err(ParseError::UnexpectedEnd {
                    keyword: caps[1].to_ascii_lowercase(),
                    line: self.pos + 1,
                });
            }

            if let Some(caps) = RE_FUNCTION.captures(code) {
                let access = caps.get(1).map(|m| access_modifier(m.as_str()));
                let is_override = caps.get(2).is_some();
                let func = self.function(&caps, raw)?;
                body.push(ClassMember::Method(Method {
                    func,
                    access,
                    is_override,
                }));
                continue;
            }
            if RE_FUNCTION_START.is_match(code) {
                return Err(ParseError::malformed("method declaration", self.pos, code));
            }

            if let Some(caps) = RE_CLASS_FIELD.captures(code) {
                let type_ref = match (caps.get(3), caps.get(4)) {
                    (Some(token), _) => Some(TypeRef::from_token(token.as_str())),
                    (None, value) => designated_type(&caps[2])
                        .or_else(|| value.map(|v| inferred_type(&expression(v.as_str())))),
                };
                body.push(ClassMember::Field(Field {
                    name: caps[2].to_string(),
                    type_ref,
                    access: caps.get(1).map(|m| access_modifier(m.as_str())),
                    annotations: std::mem::take(&mut self.annotations),
                    range: Range::new(self.pos, indent(raw), self.pos, code.trim_end().len()),
                }));
                if let Some(comment) = self.trailing(trailing) {
                    body.push(ClassMember::Comment(comment));
                }
                self.pos += 1;
                continue;
            }

            trace!(line = self.pos, "skipping class body line");
            self.pos += 1;
        }

        Err(ParseError::Unterminated {
            keyword: opened.keyword.to_string(),
            line: opened.line + 1,
        })
    }

    fn interface(
        &mut self,
        code: &str,
        trailing: Option<(usize, &str)>,
    ) -> Result<Interface, ParseError> {
        let caps = RE_INTERFACE
            .captures(code)
            .ok_or_else(|| ParseError::malformed("interface declaration", self.pos, code))?;
        let opened = Opened {
            keyword: "interface",
            line: self.pos,
        };
        let name = caps[1].to_string();
        let parent = caps.get(2).map(|m| m.as_str().to_string());
        let annotations = std::mem::take(&mut self.annotations);
        let start_col = indent(self.lines[self.pos]);

        let mut body = Vec::new();
        if let Some(comment) = self.trailing(trailing) {
            body.push(InterfaceMember::Comment(comment));
        }
        self.pos += 1;

        while let Some(&raw) = self.lines.get(self.pos) {
            if is_blank(raw) {
                self.pos += 1;
                continue;
            }
            if is_comment(raw) {
                body.push(InterfaceMember::Comment(self.comment_block()));
                continue;
            }
            if self.annotation(raw) {
                continue;
            }

            let (code, trailing) = split_trailing_comment(raw);
            if let Some(caps) = RE_END.captures(code) {
                if caps[1].eq_ignore_ascii_case("interface") {
                    let range = Range::new(opened.line, start_col, self.pos, raw.trim_end().len());
                    self.pos += 1;
                    return Ok(Interface {
                        name,
                        parent,
                        body,
                        annotations,
                        range,
                    });
                }
                return Err(ParseError::UnexpectedEnd {
                    keyword: caps[1].to_ascii_lowercase(),
                    line: self.pos + 1,
                });
            }

            if let Some(caps) = RE_FUNCTION.captures(code) {
                let method = self.signature(&caps, raw)?;
                body.push(InterfaceMember::Method(method));
            } else if let Some(caps) = RE_INTERFACE_FIELD.captures(code) {
                body.push(InterfaceMember::Field(InterfaceField {
                    name: caps[1].to_string(),
                    type_token: caps.get(2).map(|m| m.as_str().to_string()),
                    range: Range::new(self.pos, indent(raw), self.pos, code.trim_end().len()),
                }));
                self.annotations.clear();
            } else {
                return Err(ParseError::malformed("interface member", self.pos, code));
            }
            if let Some(comment) = self.trailing(trailing) {
                body.push(InterfaceMember::Comment(comment));
            }
            self.pos += 1;
        }

        Err(ParseError::Unterminated {
            keyword: opened.keyword.to_string(),
            line: opened.line + 1,
        })
    }

    fn enumeration(
        &mut self,
        code: &str,
        trailing: Option<(usize, &str)>,
    ) -> Result<Enum, ParseError> {
        let caps = RE_ENUM
            .captures(code)
            .ok_or_else(|| ParseError::malformed("enum declaration", self.pos, code))?;
        let opened = Opened {
            keyword: "enum",
            line: self.pos,
        };
        let name = caps[1].to_string();
        let annotations = std::mem::take(&mut self.annotations);
        let start_col = indent(self.lines[self.pos]);

        let mut body = Vec::new();
        if let Some(comment) = self.trailing(trailing) {
            body.push(EnumBodyItem::Comment(comment));
        }
        self.pos += 1;

        // Next value for members without an explicit one
        let mut next_value: Option<i64> = Some(0);

        while let Some(&raw) = self.lines.get(self.pos) {
            if is_blank(raw) {
                self.pos += 1;
                continue;
            }
            if is_comment(raw) {
                body.push(EnumBodyItem::Comment(self.comment_block()));
                continue;
            }

            let (code, trailing) = split_trailing_comment(raw);
            if let Some(caps) = RE_END.captures(code) {
                if caps[1].eq_ignore_ascii_case("enum") {
                    let range = Range::new(opened.line, start_col, self.pos, raw.trim_end().len());
                    self.pos += 1;
                    return Ok(Enum {
                        name,
                        body,
                        annotations,
                        range,
                    });
                }
                return Err(ParseError::UnexpectedEnd {
                    keyword: caps[1].to_ascii_lowercase(),
                    line: self.pos + 1,
                });
            }

            let caps = RE_ENUM_MEMBER
                .captures(code)
                .ok_or_else(|| ParseError::malformed("enum member", self.pos, code))?;
            let value = match caps.get(2) {
                Some(value) => {
                    let value = value.as_str().to_string();
                    next_value = value.parse::<i64>().ok().map(|n| n + 1);
                    value
                }
                None => match next_value {
                    Some(n) => {
                        next_value = Some(n + 1);
                        n.to_string()
                    }
                    None => {
                        warn!(
                            line = self.pos + 1,
                            "enum member '{}' follows a non-integer member; value left open",
                            &caps[1]
                        );
                        "{}".to_string()
                    }
                },
            };
            body.push(EnumBodyItem::Member(EnumMember {
                name: caps[1].to_string(),
                value,
                range: Range::new(self.pos, indent(raw), self.pos, code.trim_end().len()),
            }));
            if let Some(comment) = self.trailing(trailing) {
                body.push(EnumBodyItem::Comment(comment));
            }
            self.pos += 1;
        }

        Err(ParseError::Unterminated {
            keyword: opened.keyword.to_string(),
            line: opened.line + 1,
        })
    }

    fn namespace(
        &mut self,
        code: &str,
        trailing: Option<(usize, &str)>,
    ) -> Result<Namespace, ParseError> {
        let caps = RE_NAMESPACE
            .captures(code)
            .ok_or_else(|| ParseError::malformed("namespace declaration", self.pos, code))?;
        let opened = Opened {
            keyword: "namespace",
            line: self.pos,
        };
        let name = caps[1].to_string();
        let annotations = std::mem::take(&mut self.annotations);
        let start_col = indent(self.lines[self.pos]);

        let mut body = Vec::new();
        if let Some(comment) = self.trailing(trailing) {
            body.push(Statement::Comment(comment));
        }
        self.pos += 1;
        body.extend(self.statements(Some(opened))?);

        // `statements` consumed the `end namespace` line
        let end_line = self.pos - 1;
        Ok(Namespace {
            name,
            body,
            annotations,
            range: Range::new(
                opened.line,
                start_col,
                end_line,
                self.lines[end_line].trim_end().len(),
            ),
        })
    }

    fn constant(&mut self, code: &str) -> Result<Const, ParseError> {
        let caps = RE_CONST
            .captures(code)
            .ok_or_else(|| ParseError::malformed("const declaration", self.pos, code))?;
        let raw = self.lines[self.pos];
        Ok(Const {
            name: caps[1].to_string(),
            value: expression(&caps[2]),
            annotations: std::mem::take(&mut self.annotations),
            range: Range::new(self.pos, indent(raw), self.pos, code.trim_end().len()),
        })
    }
}

impl Function {
    fn kind_keyword(&self) -> &'static str {
        match self.kind {
            FunctionKind::Function => "function",
            FunctionKind::Sub => "sub",
        }
    }
}

fn access_modifier(word: &str) -> AccessModifier {
    match word.to_ascii_lowercase().as_str() {
        "private" => AccessModifier::Private,
        "protected" => AccessModifier::Protected,
        _ => AccessModifier::Public,
    }
}
