use thiserror::Error;

/// Structural problems found while reading declarations. Line numbers are
/// 1-based.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("line {line}: missing 'end {keyword}' for the {keyword} opened here")]
    Unterminated { keyword: String, line: usize },

    #[error("line {line}: unexpected 'end {keyword}'")]
    UnexpectedEnd { keyword: String, line: usize },

    #[error("line {line}: malformed {what}: {text}")]
    Malformed {
        what: &'static str,
        line: usize,
        text: String,
    },
}

impl ParseError {
    pub(crate) fn malformed(what: &'static str, index: usize, text: &str) -> Self {
        Self::Malformed {
            what,
            line: index + 1,
            text: text.trim().to_string(),
        }
    }
}
