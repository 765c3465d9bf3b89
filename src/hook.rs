//! Pre-parse hook: rewrites a source file's text into its JSDoc carrier
//! before the documentation generator reads it.

use crate::model::ParseMode;
use crate::options::PluginOptions;
use crate::parser::ParseError;
use crate::tags;
use crate::Converter;
use std::path::Path;
use tracing::debug;

/// A file about to be parsed by the documentation generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeforeParseEvent {
    pub source: String,
    pub filename: String,
}

/// `.bs` files (any case) are BrighterScript, everything else BrightScript.
pub fn parse_mode_for(filename: &str) -> ParseMode {
    let is_bs = Path::new(filename)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("bs"));
    if is_bs {
        ParseMode::BrighterScript
    } else {
        ParseMode::BrightScript
    }
}

/// Module a file documents: its `@module` tag, or a slug of the file name
/// (`game.utils.bs` becomes `game_utils`). Empty when modules are off.
pub fn module_name(options: &PluginOptions, filename: &str, source: &str) -> String {
    if !options.add_module {
        return String::new();
    }
    if let Some(name) = tags::module_tag(source) {
        return name.to_string();
    }
    Path::new(filename)
        .file_stem()
        .map(|stem| stem.to_string_lossy().replace('.', "_"))
        .unwrap_or_default()
}

/// Replace `event.source` with its converted text. On a parse error the
/// event is left untouched.
pub fn before_parse(converter: &mut Converter, event: &mut BeforeParseEvent) -> Result<(), ParseError> {
    let mode = parse_mode_for(&event.filename);
    let module = module_name(converter.options(), &event.filename, &event.source);
    debug!(file = %event.filename, ?mode, module = %module, "converting");
    event.source = converter.convert(&event.source, mode, &module)?;
    Ok(())
}
