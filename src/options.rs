//! Plugin options, read from the JSDoc environment.
//!
//! JSDoc hands plugins its parsed `conf.json` / command line as `env.opts`;
//! this plugin's switches live under `opts["brighterscript-jsdocs-plugin"]`.
//! Both switches default to on when absent, `null` or not a boolean; each
//! key is read on its own.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Key of this plugin's section inside `opts`.
pub const OPTIONS_KEY: &str = "brighterscript-jsdocs-plugin";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginOptions {
    /// Emit a `@module` block per file and `@memberof! module:` tags.
    pub add_module: bool,
    /// Escape `& < > " '` in comment text.
    pub escape_html_characters: bool,
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self {
            add_module: true,
            escape_html_characters: true,
        }
    }
}

// Wire form: every field optional; a value that is not a boolean reads as
// absent instead of failing the whole section.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawOptions {
    #[serde(default, deserialize_with = "lenient_bool")]
    add_module: Option<bool>,
    #[serde(default, rename = "escapeHTMLCharacters", deserialize_with = "lenient_bool")]
    escape_html_characters: Option<bool>,
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<bool>, D::Error> {
    Ok(Value::deserialize(deserializer)?.as_bool())
}

impl PluginOptions {
    /// Read options from a JSDoc environment object (`{"opts": {...}}`).
    /// Missing sections or values of the wrong shape fall back to defaults.
    pub fn from_env(env: &Value) -> Self {
        env.get("opts")
            .and_then(|opts| opts.get(OPTIONS_KEY))
            .map(Self::from_section)
            .unwrap_or_default()
    }

    /// Read options from this plugin's own section.
    pub fn from_section(section: &Value) -> Self {
        let raw: RawOptions = serde_json::from_value(section.clone()).unwrap_or_default();
        let defaults = Self::default();
        Self {
            add_module: raw.add_module.unwrap_or(defaults.add_module),
            escape_html_characters: raw
                .escape_html_characters
                .unwrap_or(defaults.escape_html_characters),
        }
    }
}
