//! Comment sanitisation before persistence.
//!
//! The note editor escapes markdown-link delimiters so they can be edited
//! literally; the escapes are undone exactly once before the comment is
//! written to the local store.

/// Unescape `\[`, `\]`, `\(`, `\)` back into their bare delimiters.
///
/// Every other character, including backslashes not followed by one of the
/// four delimiters, passes through unchanged. Applying the function to a
/// string with no remaining escape sequences is a no-op.
pub fn unescape_markdown_delimiters(comment: &str) -> String {
    let mut out = String::with_capacity(comment.len());
    let mut chars = comment.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\'
            && let Some(&next) = chars.peek()
            && matches!(next, '[' | ']' | '(' | ')')
        {
            out.push(next);
            chars.next();
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unescapes_all_four_delimiters() {
        assert_eq!(
            unescape_markdown_delimiters(r"\[link\]\(https://example.com\)"),
            "[link](https://example.com)"
        );
    }

    #[test]
    fn plain_text_unchanged() {
        assert_eq!(unescape_markdown_delimiters("no escapes here"), "no escapes here");
    }

    #[test]
    fn unrelated_escapes_preserved() {
        assert_eq!(unescape_markdown_delimiters(r"a\nb \x \\"), r"a\nb \x \\");
    }

    #[test]
    fn trailing_backslash_preserved() {
        assert_eq!(unescape_markdown_delimiters(r"ends with \"), r"ends with \");
    }

    #[test]
    fn idempotent_once_unescaped() {
        for input in [r"\[x\]", "[x]", "plain", r"mix \(a\) [b]", ""] {
            let once = unescape_markdown_delimiters(input);
            assert_eq!(unescape_markdown_delimiters(&once), once);
        }
    }
}
