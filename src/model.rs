//! Statement tree produced by the declaration parser and consumed by the
//! converter.
//!
//! Only declarations and comments are modelled. Function bodies, expressions
//! and everything else the documentation output does not need are dropped by
//! the parser.

/// Source dialect. `.bs` files are BrighterScript, everything else is plain
/// BrightScript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    BrightScript,
    #[default]
    BrighterScript,
}

/// Zero-based line/column location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start_line: usize, start_col: usize, end_line: usize, end_col: usize) -> Self {
        Self {
            start: Position {
                line: start_line,
                column: start_col,
            },
            end: Position {
                line: end_line,
                column: end_col,
            },
        }
    }
}

/// One or more contiguous comment lines, raw text joined with `\n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub text: String,
    pub range: Range,
}

/// `@name(args)` line attached to the declaration below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub name: String,
    pub range: Range,
}

/// Types the language knows by keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinType {
    Boolean,
    Integer,
    LongInteger,
    Float,
    Double,
    String,
    Object,
    Dynamic,
    Void,
    Function,
    Invalid,
    /// Inferred from an initializer whose type cannot be determined.
    Uninitialized,
}

impl BuiltinType {
    /// Look up a type keyword (case-insensitive).
    pub fn from_keyword(word: &str) -> Option<Self> {
        let ty = match word.to_ascii_lowercase().as_str() {
            "boolean" => Self::Boolean,
            "integer" => Self::Integer,
            "longinteger" => Self::LongInteger,
            "float" => Self::Float,
            "double" => Self::Double,
            "string" => Self::String,
            "object" => Self::Object,
            "dynamic" => Self::Dynamic,
            "void" => Self::Void,
            "function" => Self::Function,
            "invalid" => Self::Invalid,
            _ => return None,
        };
        Some(ty)
    }

    /// Display form used in doc tags. `None` when the type has no name.
    pub fn type_string(self) -> Option<&'static str> {
        match self {
            Self::Boolean => Some("boolean"),
            Self::Integer => Some("integer"),
            Self::LongInteger => Some("longinteger"),
            Self::Float => Some("float"),
            Self::Double => Some("double"),
            Self::String => Some("string"),
            Self::Object => Some("object"),
            Self::Dynamic => Some("dynamic"),
            Self::Void => Some("void"),
            Self::Function => Some("function"),
            Self::Invalid => Some("invalid"),
            Self::Uninitialized => None,
        }
    }
}

/// Semantic type of a declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeRef {
    /// A user type such as a class, interface or enum (possibly dotted).
    Custom(String),
    Builtin(BuiltinType),
}

impl TypeRef {
    /// Resolve a written type token: keywords become builtins, anything else
    /// names a custom type.
    pub fn from_token(token: &str) -> Self {
        match BuiltinType::from_keyword(token) {
            Some(builtin) => Self::Builtin(builtin),
            None => Self::Custom(token.to_string()),
        }
    }
}

/// Initializer expression, kept as source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    /// A single literal token: string, number, boolean or `invalid`.
    Literal(String),
    Other(String),
}

impl Expression {
    pub fn text(&self) -> &str {
        match self {
            Self::Literal(text) | Self::Other(text) => text,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessModifier {
    Public,
    Protected,
    Private,
}

/// `function` returns a value, `sub` does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FunctionKind {
    #[default]
    Function,
    Sub,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub type_ref: Option<TypeRef>,
    pub default_value: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub name: String,
    pub kind: FunctionKind,
    pub params: Vec<Param>,
    pub return_type: Option<TypeRef>,
    pub annotations: Vec<Annotation>,
    pub range: Range,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub func: Function,
    pub access: Option<AccessModifier>,
    pub is_override: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub type_ref: Option<TypeRef>,
    pub access: Option<AccessModifier>,
    pub annotations: Vec<Annotation>,
    pub range: Range,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassMember {
    Comment(Comment),
    Field(Field),
    Method(Method),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Class {
    pub name: String,
    pub parent: Option<String>,
    pub body: Vec<ClassMember>,
    pub annotations: Vec<Annotation>,
    pub range: Range,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceField {
    pub name: String,
    /// Type token exactly as written.
    pub type_token: Option<String>,
    pub range: Range,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterfaceMember {
    Comment(Comment),
    Field(InterfaceField),
    Method(Function),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interface {
    pub name: String,
    pub parent: Option<String>,
    pub body: Vec<InterfaceMember>,
    pub annotations: Vec<Annotation>,
    pub range: Range,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumMember {
    pub name: String,
    /// Value text, explicit or auto-numbered.
    pub value: String,
    pub range: Range,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumBodyItem {
    Comment(Comment),
    Member(EnumMember),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enum {
    pub name: String,
    pub body: Vec<EnumBodyItem>,
    pub annotations: Vec<Annotation>,
    pub range: Range,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Const {
    pub name: String,
    pub value: Expression,
    pub annotations: Vec<Annotation>,
    pub range: Range,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Namespace {
    /// Dotted name as written, e.g. `alpha.beta`.
    pub name: String,
    pub body: Vec<Statement>,
    pub annotations: Vec<Annotation>,
    pub range: Range,
}

/// A top-level or namespace-level statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Comment(Comment),
    Function(Function),
    Class(Class),
    Interface(Interface),
    Enum(Enum),
    Const(Const),
    Namespace(Namespace),
}

/// Anything the comment matcher can look a comment up for.
pub trait Declaration {
    fn range(&self) -> Range;

    fn annotations(&self) -> &[Annotation] {
        &[]
    }
}

macro_rules! impl_declaration {
    ($($ty:ty),*) => {
        $(
            impl Declaration for $ty {
                fn range(&self) -> Range {
                    self.range
                }

                fn annotations(&self) -> &[Annotation] {
                    &self.annotations
                }
            }
        )*
    };
}

impl_declaration!(Function, Field, Class, Interface, Enum, Const, Namespace);

impl Declaration for Method {
    fn range(&self) -> Range {
        self.func.range
    }

    fn annotations(&self) -> &[Annotation] {
        &self.func.annotations
    }
}

impl Declaration for InterfaceField {
    fn range(&self) -> Range {
        self.range
    }
}
