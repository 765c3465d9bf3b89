use super::{Converter, Scope};
use crate::comment::BLOCK_CLOSE;
use crate::model::{Comment, Const, Expression};

/// Stand-in for initializers that are not a single literal.
const PLACEHOLDER: &str = "{}";

impl Converter {
    pub(super) fn constant(&self, comment: Option<&Comment>, c: &Const, scope: Scope<'_>) -> String {
        let mut lines = self.open_block(comment);
        lines.extend(scope.member_of());
        lines.push(" * @readonly".to_string());
        lines.push(" * @constant".to_string());
        lines.push(" * @default".to_string());
        lines.push(BLOCK_CLOSE.to_string());

        let value = match &c.value {
            Expression::Literal(text) => text.as_str(),
            Expression::Other(_) => PLACEHOLDER,
        };
        lines.push(format!("var {} = {};", c.name, value));
        lines.extend(scope.namespace_binding(&c.name));
        lines.join("\n")
    }
}
