use super::{Callable, Converter, Scope};
use crate::comment::{self, BLOCK_CLOSE};
use crate::matcher::comment_for;
use crate::model::{Comment, Interface, InterfaceField, InterfaceMember};
use crate::tags;
use crate::types::DYNAMIC;

impl Converter {
    /// Interface block, a constructor-like function stub and one prototype
    /// assignment per method.
    pub(super) fn interface(
        &self,
        comment: Option<&Comment>,
        iface: &Interface,
        scope: Scope<'_>,
    ) -> String {
        let comments: Vec<&Comment> = iface
            .body
            .iter()
            .filter_map(|member| match member {
                InterfaceMember::Comment(comment) => Some(comment),
                _ => None,
            })
            .collect();

        let mut lines = self.open_block(comment);
        lines.push(" * @interface".to_string());
        let mut lines = tags::strip_bare_extends(lines);
        if let Some(parent) = &iface.parent {
            lines.push(format!(" * @extends {}", parent));
        }
        lines.extend(scope.member_of());
        for member in &iface.body {
            if let InterfaceMember::Field(field) = member {
                lines.push(self.interface_property(comment_for(&comments, field), field));
            }
        }
        lines.push(BLOCK_CLOSE.to_string());
        lines.push(format!("function {}() {{ }};\n", iface.name));

        for member in &iface.body {
            if let InterfaceMember::Method(func) = member {
                let callable = Callable::InterfaceMethod {
                    func,
                    interface: &iface.name,
                };
                lines.push(self.function(comment_for(&comments, func), callable, Scope::default()));
            }
        }

        lines.extend(scope.namespace_binding(&iface.name));
        lines.join("\n")
    }

    // Interface fields use the type token as written.
    fn interface_property(&self, comment: Option<&Comment>, field: &InterfaceField) -> String {
        let description = comment::describe(comment, self.options.escape_html_characters);
        format!(
            " * @property {{{}}} {} {}",
            field.type_token.as_deref().unwrap_or(DYNAMIC),
            field.name,
            description
        )
        .trim_end()
        .to_string()
    }
}
