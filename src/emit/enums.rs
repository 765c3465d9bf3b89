use super::{Converter, Scope};
use crate::comment::BLOCK_CLOSE;
use crate::model::{Comment, Enum, EnumBodyItem};

impl Converter {
    /// Read-only enum object. Comments inside the body become their own
    /// blocks so they stay attached to the member below them.
    pub(super) fn enumeration(&self, comment: Option<&Comment>, e: &Enum, scope: Scope<'_>) -> String {
        let mut lines = self.open_block(comment);
        lines.extend(scope.member_of());
        lines.push(" * @readonly".to_string());
        lines.push(" * @enum".to_string());
        lines.push(BLOCK_CLOSE.to_string());

        if scope.namespace.is_empty() {
            lines.push(format!("var {} = {{", e.name));
        } else {
            lines.push(format!("{}.{} = {{", scope.namespace, e.name));
        }
        for item in &e.body {
            match item {
                EnumBodyItem::Comment(comment) => {
                    lines.extend(self.open_block(Some(comment)));
                    lines.push(BLOCK_CLOSE.to_string());
                }
                EnumBodyItem::Member(member) => {
                    lines.push(format!("{}: {},", member.name, member.value));
                }
            }
        }
        lines.push("};".to_string());
        lines.join("\n")
    }
}
