//! Trailing whitespace and blank line cleanup

use regex::Regex;
use std::sync::LazyLock;

use super::Worker;
use crate::link_appender::LinkAppender;

static TRAILING_WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)[ \t]+$").expect("Invalid regex"));

static BLANK_RUN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("Invalid regex"));

/// Strips trailing whitespace and collapses runs of blank lines into one
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceWorker;

impl Worker for WhitespaceWorker {
    fn process_content(&self, content: &str, _links: &mut LinkAppender) -> String {
        let normalized = content.replace("\r\n", "\n");
        let trimmed = TRAILING_WHITESPACE_REGEX.replace_all(&normalized, "");
        BLANK_RUN_REGEX.replace_all(&trimmed, "\n\n").into_owned()
    }

    fn priority(&self) -> i32 {
        100
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn process(content: &str) -> String {
        WhitespaceWorker.process_content(content, &mut LinkAppender::new())
    }

    #[test]
    fn test_trims_and_collapses() {
        assert_eq!(process("## v1  \n\n\n\n- a\t\n"), "## v1\n\n- a\n");
    }

    #[test]
    fn test_windows_line_endings() {
        assert_eq!(process("- a \r\n- b\r\n"), "- a\n- b\n");
    }

    #[test]
    fn test_clean_content_unchanged() {
        let content = "# Changelog\n\n## v1.0.0\n\n- [#1] Initial\n";
        assert_eq!(process(content), content);
    }
}
