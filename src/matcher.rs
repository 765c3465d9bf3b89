//! Comment-to-declaration matcher.

use crate::model::{Comment, Declaration};

/// Find the comment documenting `decl`: the first one ending on the line
/// just above the declaration (above its first annotation, if annotated), or
/// on the declaration's own first line.
pub fn comment_for<'c, D>(comments: &[&'c Comment], decl: &D) -> Option<&'c Comment>
where
    D: Declaration + ?Sized,
{
    let start = decl.range().start.line;
    let target = decl
        .annotations()
        .first()
        .map(|annotation| annotation.range.start.line)
        .unwrap_or(start);

    comments.iter().copied().find(|comment| {
        let end = comment.range.end.line;
        end + 1 == target || end == start
    })
}
