//! Links bracketed version headlines to the diff against the previous release

use regex::Regex;
use std::sync::LazyLock;

use tracing::debug;

use super::Worker;
use crate::link_appender::LinkAppender;
use crate::pattern::{is_link_syntax_after, RegexPattern};

static VERSION_HEADLINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(RegexPattern::VERSION_HEADLINE).expect("Invalid regex"));

/// For `## [v1.1.0]` headlines, newest first, registers
/// `[v1.1.0]: <repo>/compare/v1.0.0...v1.1.0`.
///
/// An `Unreleased` headline compares the newest release with `HEAD`. The
/// oldest version has nothing to compare with and gets no link.
#[derive(Debug, Clone)]
pub struct DiffLinksToVersionsWorker {
    repository_url: String,
}

impl DiffLinksToVersionsWorker {
    pub fn new(repository_url: impl Into<String>) -> Self {
        Self {
            repository_url: repository_url.into(),
        }
    }
}

impl Worker for DiffLinksToVersionsWorker {
    fn process_content(&self, content: &str, links: &mut LinkAppender) -> String {
        let versions: Vec<&str> = VERSION_HEADLINE_REGEX
            .captures_iter(content)
            .filter(|caps| {
                caps.get(0)
                    .is_some_and(|whole| !is_link_syntax_after(content, whole.end()))
            })
            .filter_map(|caps| caps.name("version").map(|m| m.as_str()))
            .collect();

        for pair in versions.windows(2) {
            let (newer, older) = (pair[0], pair[1]);
            let target = if newer.eq_ignore_ascii_case("unreleased") {
                "HEAD"
            } else {
                newer
            };

            links.add(
                newer,
                format!(
                    "[{}]: {}/compare/{}...{}",
                    newer, self.repository_url, older, target
                ),
            );
        }

        debug!(versions = versions.len(), "version diff links registered");
        content.to_string()
    }

    fn priority(&self) -> i32 {
        500
    }

    fn name(&self) -> &'static str {
        "diff_links_to_versions"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(content: &str) -> LinkAppender {
        let mut links = LinkAppender::new();
        DiffLinksToVersionsWorker::new("https://github.com/acme/widget")
            .process_content(content, &mut links);
        links
    }

    #[test]
    fn test_compare_links_newest_first() {
        let content = "## [Unreleased]\n\n## [v1.1.0] - 2024-02-01\n\n- a\n\n## [v1.0.0] - 2024-01-01\n\n- b\n";
        let links = run(content);

        assert_eq!(
            links.content(),
            "[Unreleased]: https://github.com/acme/widget/compare/v1.1.0...HEAD\n\
             [v1.1.0]: https://github.com/acme/widget/compare/v1.0.0...v1.1.0"
        );
        assert!(!links.has_id("v1.0.0"));
    }

    #[test]
    fn test_plain_headlines_are_ignored() {
        let links = run("## v1.1.0\n\n## v1.0.0\n");
        assert!(links.is_empty());
    }

    #[test]
    fn test_linked_headlines_are_skipped() {
        let content = "## [v1.1.0](https://example.com)\n\n## [v1.0.0]\n";
        assert!(run(content).is_empty());
    }
}
