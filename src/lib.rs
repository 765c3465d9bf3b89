//! brs-jsdoc: convert BrighterScript / BrightScript doc comments into JSDoc.
//!
//! The output is pseudo-JavaScript: one `/** ... */` block per declaration,
//! each followed by a stub (`function f (a) { };`, `class X { ... }`,
//! `var E = { ... };`) so a JavaScript documentation generator can pick the
//! tags up. It is never meant to run.
//!
//! ```
//! use brs_jsdoc::{Converter, ParseMode};
//!
//! let mut converter = Converter::default();
//! let js = converter
//!     .convert("' Say hi\nsub hi()\nend sub", ParseMode::BrighterScript, "")
//!     .unwrap();
//! assert!(js.contains(" * Say hi\n * @function\n * @returns {void}"));
//! ```

pub mod comment;
mod emit;
pub mod hook;
pub mod matcher;
pub mod model;
pub mod options;
pub mod parser;
pub mod registry;
pub mod tags;
pub mod types;

pub use emit::Converter;
pub use hook::{before_parse, BeforeParseEvent};
pub use model::ParseMode;
pub use options::PluginOptions;
pub use parser::{parse, ParseError};
