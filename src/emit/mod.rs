//! JSDoc emission: the statement walker, the per-declaration processors
//! and the top-level driver.
//!
//! Every processor returns one text fragment: a documentation block
//! followed by a stub declaration. Fragments are joined with newlines in
//! source order.

mod class;
mod constant;
mod enums;
mod function;
mod interface;
mod namespace;

use crate::comment::BLOCK_CLOSE;
use crate::matcher::comment_for;
use crate::model::{Comment, ParseMode, Statement};
use crate::options::PluginOptions;
use crate::parser::{self, ParseError};
use crate::registry::Registry;
use tracing::{debug, trace};

pub(crate) use function::Callable;

/// Converts source files into JSDoc carrier text.
///
/// A converter remembers which namespaces and modules it has already
/// declared, so converting several files with one converter declares each
/// container once. Use [`Converter::reset`] (or a fresh converter) between
/// unrelated runs.
#[derive(Debug, Default)]
pub struct Converter {
    options: PluginOptions,
    registry: Registry,
}

/// Enclosing containers of a declaration.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Scope<'a> {
    /// Module of the file being converted, dotted or slashed.
    pub module: &'a str,
    /// Fully qualified dotted namespace, empty at the root.
    pub namespace: &'a str,
}

impl Scope<'_> {
    /// `@memberof!` tag for declarations in this scope. A namespace wins
    /// over the module.
    pub fn member_of(&self) -> Option<String> {
        if !self.namespace.is_empty() {
            Some(format!(" * @memberof! {}", self.namespace.replace('.', "/")))
        } else if !self.module.is_empty() {
            Some(format!(" * @memberof! module:{}", self.module.replace('.', "/")))
        } else {
            None
        }
    }

    /// Dotted name of `name` inside this scope's namespace.
    pub fn qualify(&self, name: &str) -> String {
        if self.namespace.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.namespace, name)
        }
    }

    /// `Ns.name = name;` binding for namespaced declarations.
    pub fn namespace_binding(&self, name: &str) -> Option<String> {
        if self.namespace.is_empty() {
            None
        } else {
            Some(format!("{}.{} = {};", self.namespace, name, name))
        }
    }
}

impl Converter {
    pub fn new(options: PluginOptions) -> Self {
        Self {
            options,
            registry: Registry::new(),
        }
    }

    pub fn options(&self) -> &PluginOptions {
        &self.options
    }

    /// Forget every namespace and module declared so far.
    pub fn reset(&mut self) {
        self.registry.reset();
    }

    /// Parse `source` and convert it. `module_name` may be empty.
    ///
    /// Parse errors are returned unchanged and produce no output.
    pub fn convert(
        &mut self,
        source: &str,
        mode: ParseMode,
        module_name: &str,
    ) -> Result<String, ParseError> {
        let statements = parser::parse(source, mode)?;
        Ok(self.convert_statements(&statements, module_name))
    }

    /// Convert an already parsed statement tree.
    pub fn convert_statements(&mut self, statements: &[Statement], module_name: &str) -> String {
        let mut output = Vec::new();
        if self.options.add_module && !module_name.is_empty() {
            output.push(self.module_block(module_name));
        }
        let scope = Scope {
            module: module_name,
            namespace: "",
        };
        output.push(self.statements(statements, scope));
        output.join("\n")
    }

    /// `@module` block, empty if this module was already declared.
    fn module_block(&mut self, module_name: &str) -> String {
        let name = module_name.replace('.', "/");
        if !self.registry.declare_module(&name) {
            debug!(module = %name, "module already declared");
            return String::new();
        }
        debug!(module = %name, "declaring module");
        [
            "/**".to_string(),
            format!(" * @module {}", name),
            BLOCK_CLOSE.to_string(),
        ]
        .join("\n")
    }

    /// Walk a statement list, dispatching each declaration to its processor.
    pub(crate) fn statements(&mut self, statements: &[Statement], scope: Scope<'_>) -> String {
        let comments: Vec<&Comment> = statements
            .iter()
            .filter_map(|stmt| match stmt {
                Statement::Comment(comment) => Some(comment),
                _ => None,
            })
            .collect();

        let mut output = Vec::new();
        for stmt in statements {
            let fragment = match stmt {
                Statement::Comment(_) => continue,
                Statement::Function(func) => {
                    trace!(name = %func.name, "function");
                    self.function(comment_for(&comments, func), Callable::Function(func), scope)
                }
                Statement::Class(class) => {
                    trace!(name = %class.name, "class");
                    self.class(comment_for(&comments, class), class, scope)
                }
                Statement::Interface(iface) => {
                    trace!(name = %iface.name, "interface");
                    self.interface(comment_for(&comments, iface), iface, scope)
                }
                Statement::Enum(e) => {
                    trace!(name = %e.name, "enum");
                    self.enumeration(comment_for(&comments, e), e, scope)
                }
                Statement::Const(c) => {
                    trace!(name = %c.name, "const");
                    self.constant(comment_for(&comments, c), c, scope)
                }
                Statement::Namespace(ns) => {
                    trace!(name = %ns.name, "namespace");
                    self.namespace(comment_for(&comments, ns), ns, scope)
                }
            };
            output.push(fragment);
        }
        output.join("\n")
    }

    /// Comment lines of a block, ready for tags to be appended.
    fn open_block(&self, comment: Option<&Comment>) -> Vec<String> {
        crate::comment::normalize(comment, self.options.escape_html_characters)
    }
}
