//! Final layout pass over reporter output

use regex::Regex;
use std::sync::LazyLock;

static HEADLINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#{1,6} ").expect("Invalid regex"));

/// Normalizes blank lines around headlines and at the document edges
#[derive(Debug, Clone, Copy, Default)]
pub struct DumpMergesFormatter;

impl DumpMergesFormatter {
    /// Every headline is surrounded by exactly one blank line, blank runs
    /// collapse to one, leading blanks are dropped and the result ends with
    /// a single newline. Empty input stays empty.
    pub fn format(&self, content: &str) -> String {
        let mut lines: Vec<&str> = Vec::new();

        for line in content.lines().map(str::trim_end) {
            let is_headline = HEADLINE_REGEX.is_match(line);
            if is_headline {
                push_blank(&mut lines);
            }
            if line.is_empty() {
                push_blank(&mut lines);
            } else {
                lines.push(line);
            }
            if is_headline {
                push_blank(&mut lines);
            }
        }

        while lines.last() == Some(&"") {
            lines.pop();
        }
        if lines.is_empty() {
            return String::new();
        }

        let mut formatted = lines.join("\n");
        formatted.push('\n');
        formatted
    }
}

/// Blank line unless the previous line is blank or nothing was written yet
fn push_blank(lines: &mut Vec<&str>) {
    if lines.last().is_some_and(|last| !last.is_empty()) {
        lines.push("");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headlines_get_blank_lines() {
        let input = "## v1.0.0\n### Added\n- [#1] One\n- [#2] Two\n### Fixed\n- [#3] Three\n";
        let expected = "## v1.0.0\n\n### Added\n\n- [#1] One\n- [#2] Two\n\n### Fixed\n\n- [#3] Three\n";
        assert_eq!(DumpMergesFormatter.format(input), expected);
    }

    #[test]
    fn test_collapses_blank_runs_and_edges() {
        let input = "\n\n\n- a   \n\n\n\n- b\n\n\n";
        assert_eq!(DumpMergesFormatter.format(input), "- a\n\n- b\n");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(DumpMergesFormatter.format(""), "");
        assert_eq!(DumpMergesFormatter.format("\n\n  \n"), "");
    }

    #[test]
    fn test_hash_without_space_is_not_a_headline() {
        let input = "- [#12] Fix\n#hashtag\n";
        assert_eq!(DumpMergesFormatter.format(input), "- [#12] Fix\n#hashtag\n");
    }
}
