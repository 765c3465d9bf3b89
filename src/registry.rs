//! Containers already declared during a run.
//!
//! Namespace prefixes and module blocks are emitted at most once per run, so
//! the registry outlives single conversions. It belongs to the
//! [`Converter`](crate::Converter) that owns it; call
//! [`Registry::reset`] between unrelated runs.

use std::collections::HashSet;

#[derive(Debug, Default, Clone)]
pub struct Registry {
    /// Lowercased dotted namespace paths.
    namespaces: HashSet<String>,
    /// Slash-separated module names.
    modules: HashSet<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a namespace path. Returns false if it was already declared
    /// (compared case-insensitively).
    pub fn declare_namespace(&mut self, path: &str) -> bool {
        self.namespaces.insert(path.to_lowercase())
    }

    /// Record a module name. Dots and slashes are equivalent separators.
    /// Returns false if it was already declared.
    pub fn declare_module(&mut self, name: &str) -> bool {
        self.modules.insert(name.replace('.', "/"))
    }

    pub fn reset(&mut self) {
        self.namespaces.clear();
        self.modules.clear();
    }
}
