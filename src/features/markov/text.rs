//! Display cleanup for generated text

use regex::{Captures, Regex};
use std::sync::OnceLock;

static NEWLINE_RUN_RE: OnceLock<Regex> = OnceLock::new();

/// Collapse runs of three or more newlines into a `(N newlines)` marker.
///
/// Runs of one or two newlines are kept as-is.
pub fn compact_newlines(text: &str) -> String {
    let re = NEWLINE_RUN_RE.get_or_init(|| Regex::new(r"\n{3,}").expect("newline pattern is valid"));
    re.replace_all(text, |caps: &Captures| format!("({} newlines)", caps[0].len()))
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_runs_untouched() {
        assert_eq!(compact_newlines("あいうえお\n\nかきくけこ"), "あいうえお\n\nかきくけこ");
        assert_eq!(compact_newlines("a\nb"), "a\nb");
    }

    #[test]
    fn test_long_runs_collapsed() {
        assert_eq!(
            compact_newlines("あいうえお\n\n\nかきくけこ"),
            "あいうえお(3 newlines)かきくけこ"
        );
        assert_eq!(compact_newlines("a\n\n\n\n\nb\n\n\nc"), "a(5 newlines)b(3 newlines)c");
    }
}
