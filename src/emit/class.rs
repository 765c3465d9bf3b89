use super::{Callable, Converter, Scope};
use crate::comment::{self, BLOCK_CLOSE};
use crate::matcher::comment_for;
use crate::model::{AccessModifier, Class, ClassMember, Comment, Field};
use crate::tags;
use crate::types::type_name;
use tracing::trace;

impl Converter {
    /// Class block with one `@property` per visible field, then the class
    /// stub with every method inside it.
    pub(super) fn class(&self, comment: Option<&Comment>, class: &Class, scope: Scope<'_>) -> String {
        let comments: Vec<&Comment> = class
            .body
            .iter()
            .filter_map(|member| match member {
                ClassMember::Comment(comment) => Some(comment),
                _ => None,
            })
            .collect();

        let mut lines = tags::strip_bare_extends(self.open_block(comment));
        if let Some(parent) = &class.parent {
            lines.push(format!(" * @extends {}", parent));
        }
        lines.extend(scope.member_of());
        for member in &class.body {
            if let ClassMember::Field(field) = member {
                if let Some(line) = self.property(comment_for(&comments, field), field) {
                    lines.push(line);
                }
            }
        }
        lines.push(BLOCK_CLOSE.to_string());

        match &class.parent {
            Some(parent) => lines.push(format!("class {} extends {} {{\n", class.name, parent)),
            None => lines.push(format!("class {} {{\n", class.name)),
        }

        let qualified = scope.qualify(&class.name);
        for member in &class.body {
            if let ClassMember::Method(method) = member {
                let callable = Callable::Method {
                    method,
                    class: &qualified,
                };
                // Methods are documented as class members, not namespace members.
                lines.push(self.function(comment_for(&comments, method), callable, Scope::default()));
            }
        }

        lines.push("}\n".to_string());
        lines.extend(scope.namespace_binding(&class.name));
        lines.join("\n")
    }

    /// `@property` line for a field; private fields are not documented.
    fn property(&self, comment: Option<&Comment>, field: &Field) -> Option<String> {
        if field.access == Some(AccessModifier::Private) {
            trace!(field = %field.name, "skipping private field");
            return None;
        }
        let description = comment::describe(comment, self.options.escape_html_characters);
        let line = format!(
            " * @property {{{}}} {} {}",
            type_name(field.type_ref.as_ref()),
            field.name,
            description
        );
        Some(line.trim_end().to_string())
    }
}

#[cfg(test)]
mod tests {
    use crate::model::ParseMode;
    use crate::Converter;

    fn convert(source: &str) -> String {
        Converter::default()
            .convert(source, ParseMode::BrighterScript, "")
            .unwrap()
    }

    #[test]
    fn fields_become_properties() {
        let out = convert(
            "class Person\n  ' The name\n  name as string\n  private secret = 1\n  age = 3\nend class",
        );
        assert_eq!(
            out,
            "/**\n * @property {string} name The name\n * @property {integer} age\n */\nclass Person {\n\n}\n"
        );
    }

    #[test]
    fn parent_is_extended_once() {
        let out = convert("' @extends\n' A pet\nclass Dog extends Animal\nend class");
        assert_eq!(
            out,
            "/**\n * A pet\n * @extends Animal\n */\nclass Dog extends Animal {\n\n}\n"
        );
    }

    #[test]
    fn methods_live_inside_the_class() {
        let out = convert("class Box\n  sub new(size)\n  end sub\n  function area() as float\n  end function\nend class");
        assert_eq!(
            out,
            [
                "/**",
                " */",
                "class Box {\n",
                "/**\n * @function\n * @param {dynamic} size\n * @constructor\n * @returns {Box}\n */\nconstructor(size) { };\n",
                "/**\n * @function\n * @returns {float}\n */\narea () { };\n",
                "}\n",
            ]
            .join("\n")
        );
    }

    #[test]
    fn namespaced_class_is_bound_and_qualified() {
        let out = convert("namespace alpha\n  class Thing\n    sub new()\n    end sub\n  end class\nend namespace");
        assert!(out.contains(" * @memberof! alpha\n */\nclass Thing {"), "{out}");
        assert!(out.contains(" * @returns {alpha.Thing}"), "{out}");
        assert!(out.ends_with("}\n\nalpha.Thing = Thing;"), "{out}");
    }
}
