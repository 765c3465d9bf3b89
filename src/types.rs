//! Type namer: decides what a type looks like inside a doc tag.

use crate::model::TypeRef;

/// Name used when a type is unknown.
pub const DYNAMIC: &str = "dynamic";

/// Display name for a declaration's type: the custom type's name, the
/// builtin's type string, or [`DYNAMIC`].
pub fn type_name(type_ref: Option<&TypeRef>) -> String {
    match type_ref {
        None => DYNAMIC.to_string(),
        Some(TypeRef::Custom(name)) => name.clone(),
        Some(TypeRef::Builtin(builtin)) => builtin.type_string().unwrap_or(DYNAMIC).to_string(),
    }
}
