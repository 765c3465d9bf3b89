use super::{Converter, Scope};
use crate::comment::BLOCK_CLOSE;
use crate::model::{Comment, Namespace};
use tracing::debug;

impl Converter {
    /// Declare every not-yet-seen prefix of a dotted namespace, then convert
    /// its body inside the fully qualified namespace.
    ///
    /// `namespace a.b.c` inside namespace `x` declares `x.a`, `x.a.b` and
    /// `x.a.b.c` (each once per run, case-insensitively). All of them share
    /// the namespace's comment.
    pub(super) fn namespace(
        &mut self,
        comment: Option<&Comment>,
        ns: &Namespace,
        scope: Scope<'_>,
    ) -> String {
        let mut output = Vec::new();

        let mut chain = String::new();
        for (index, part) in ns.name.split('.').enumerate() {
            if !chain.is_empty() {
                chain.push('.');
            }
            chain.push_str(part);
            let path = scope.qualify(&chain);

            if !self.registry.declare_namespace(&path) {
                debug!(namespace = %path, "namespace already declared");
                continue;
            }
            debug!(namespace = %path, "declaring namespace");

            let mut lines = self.open_block(comment);
            lines.push(" * @global".to_string());
            lines.push(format!(" * @namespace {}", path.replace('.', "/")));
            if path.contains('.') {
                lines.push(format!(" * @alias {}", path));
            }
            lines.push(BLOCK_CLOSE.to_string());
            if scope.namespace.is_empty() && index == 0 {
                lines.push(format!("var {} = {{}};\n", path));
            } else {
                lines.push(format!("{} = {{}};\n", path));
            }
            output.extend(lines);
        }

        let qualified = scope.qualify(&ns.name);
        let inner = Scope {
            module: scope.module,
            namespace: &qualified,
        };
        output.push(self.statements(&ns.body, inner));
        output.join("\n")
    }
}
