//! Functions, class methods and interface methods.

use super::{Converter, Scope};
use crate::comment::BLOCK_CLOSE;
use crate::model::{AccessModifier, Comment, Function, FunctionKind, Method};
use crate::tags;
use crate::types::type_name;

/// The three shapes a callable takes in the output.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Callable<'a> {
    /// Free function: `function name (a) { };`
    Function(&'a Function),
    /// Class method: `name (a) { };` inside the class body. `class` is the
    /// qualified class name used as the constructor's return type.
    Method { method: &'a Method, class: &'a str },
    /// Interface method: `Iface.prototype.name = function(a) { };`
    InterfaceMethod { func: &'a Function, interface: &'a str },
}

impl<'a> Callable<'a> {
    fn func(&self) -> &'a Function {
        match *self {
            Self::Function(func) => func,
            Self::Method { method, .. } => &method.func,
            Self::InterfaceMethod { func, .. } => func,
        }
    }

    fn is_constructor(&self) -> bool {
        matches!(self, Self::Method { method, .. } if method.func.name.eq_ignore_ascii_case("new"))
    }
}

impl Converter {
    pub(super) fn function(
        &self,
        comment: Option<&Comment>,
        callable: Callable<'_>,
        scope: Scope<'_>,
    ) -> String {
        let func = callable.func();
        let mut lines = self.open_block(comment);
        lines.push(" * @function".to_string());

        let mut tag_lines = Vec::new();
        for param in &func.params {
            let (rest, doc) = tags::extract_param(lines, &param.name);
            lines = rest;

            let param_type = doc
                .type_name
                .unwrap_or_else(|| type_name(param.type_ref.as_ref()));
            let mut line = match &param.default_value {
                Some(value) => format!(" * @param {{{}}} [{}={}]", param_type, param.name, value.text()),
                None => format!(" * @param {{{}}} {}", param_type, param.name),
            };
            if let Some(description) = doc.description {
                push_description(&mut line, &description);
            }
            tag_lines.push(line);
        }

        if let Callable::Method { method, .. } = callable {
            if let Some(access) = access_level(method) {
                tag_lines.push(format!(" * @access {}", access));
            }
            if method.is_override {
                tag_lines.push(" * @override".to_string());
            }
        }

        let declared = match func.kind {
            FunctionKind::Sub => "void".to_string(),
            FunctionKind::Function => type_name(func.return_type.as_ref()),
        };
        let (rest, returns) = tags::extract_returns(lines);
        lines = rest;
        let mut returns_line = match returns.as_ref().and_then(|r| r.type_name.as_deref()) {
            Some(documented) => format!(" * @returns {{{}}}", documented),
            None => format!(" * @returns {{{}}}", declared),
        };
        if let Some(description) = returns.and_then(|r| r.description) {
            push_description(&mut returns_line, &description);
        }

        lines.extend(tag_lines);
        if let Callable::Function(_) = callable {
            lines.extend(scope.member_of());
        }

        let params = func
            .params
            .iter()
            .map(|p| p.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let name = &func.name;
        let stub = match callable {
            Callable::Method { class, .. } if callable.is_constructor() => {
                lines.push(" * @constructor".to_string());
                if !class.is_empty() {
                    lines.push(format!(" * @returns {{{}}}", class));
                }
                format!("constructor({}) {{ }};\n", params)
            }
            Callable::Method { .. } => {
                lines.push(returns_line);
                format!("{} ({}) {{ }};\n", name, params)
            }
            Callable::InterfaceMethod { interface, .. } => {
                lines.push(returns_line);
                format!("{}.prototype.{} = function({}) {{ }};\n", interface, name, params)
            }
            Callable::Function(_) => {
                lines.push(returns_line);
                format!("function {} ({}) {{ }};\n", name, params)
            }
        };

        lines.push(BLOCK_CLOSE.to_string());
        lines.push(stub);
        if let Callable::Function(_) = callable {
            lines.extend(scope.namespace_binding(name));
        }
        lines.join("\n")
    }
}

fn push_description(line: &mut String, description: &str) {
    let description = tags::describe(description);
    if !description.is_empty() {
        line.push(' ');
        line.push_str(&description);
    }
}

/// `@access` level: underscore names and `private` methods are private,
/// `protected` methods protected, everything else public and untagged.
fn access_level(method: &Method) -> Option<&'static str> {
    if method.func.name.starts_with('_') || method.access == Some(AccessModifier::Private) {
        Some("private")
    } else if method.access == Some(AccessModifier::Protected) {
        Some("protected")
    } else {
        None
    }
}
