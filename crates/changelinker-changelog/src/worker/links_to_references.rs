//! Registers links for `[#123]` and `[abc1234]` references

use regex::Regex;
use std::sync::LazyLock;

use tracing::trace;

use super::Worker;
use crate::link_appender::LinkAppender;
use crate::pattern::{is_link_syntax_after, RegexPattern};

static ISSUE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?:fixes|resolves) \[{}\]", RegexPattern::PR_OR_ISSUE))
        .expect("Invalid regex")
});

static CLOSING_KEYWORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"fixes|resolves").expect("Invalid regex"));

static REFERENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\[{}\]", RegexPattern::PR_OR_ISSUE)).expect("Invalid regex")
});

static COMMIT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\[{}\]", RegexPattern::COMMIT)).expect("Invalid regex")
});

/// Links issue, pull request and commit references to the repository.
///
/// `fixes [#12]` and `resolves [#12]` point at the issue; any other `[#45]`
/// that appears on its line before such a keyword points at the pull request;
/// `[abc1234]` points at the commit. References already written as a link
/// or a link definition are skipped. The content itself is not changed.
#[derive(Debug, Clone)]
pub struct LinksToReferencesWorker {
    repository_url: String,
}

impl LinksToReferencesWorker {
    pub fn new(repository_url: impl Into<String>) -> Self {
        Self {
            repository_url: repository_url.into(),
        }
    }

    fn process_issues(&self, content: &str, links: &mut LinkAppender) {
        for caps in ISSUE_REGEX.captures_iter(content) {
            let Some(whole) = caps.get(0) else { continue };
            if is_link_syntax_after(content, whole.end()) {
                continue;
            }
            self.add_numbered(&caps["id"], "issues", links);
        }
    }

    fn process_pull_requests(&self, content: &str, links: &mut LinkAppender) {
        for line in content.lines() {
            let scanned = match CLOSING_KEYWORD_REGEX.find(line) {
                Some(keyword) => &line[..keyword.start()],
                None => line,
            };

            for caps in REFERENCE_REGEX.captures_iter(scanned) {
                let Some(whole) = caps.get(0) else { continue };
                // checked against the full line, the cut may end right after the match
                if is_link_syntax_after(line, whole.end()) {
                    continue;
                }
                self.add_numbered(&caps["id"], "pull", links);
            }
        }
    }

    fn process_commits(&self, content: &str, links: &mut LinkAppender) {
        for caps in COMMIT_REGEX.captures_iter(content) {
            let (Some(whole), Some(commit)) = (caps.get(0), caps.name("commit")) else {
                continue;
            };
            if is_link_syntax_after(content, whole.end()) {
                continue;
            }

            let hash = commit.as_str();
            links.add(
                hash,
                format!("[{}]: {}/commit/{}", hash, self.repository_url, hash),
            );
        }
    }

    fn add_numbered(&self, id: &str, kind: &str, links: &mut LinkAppender) {
        if id.parse::<u32>().is_err() {
            trace!(id, "reference number out of range");
            return;
        }

        let label = format!("#{}", id);
        let line = format!("[{}]: {}/{}/{}", label, self.repository_url, kind, id);
        links.add(label, line);
    }
}

impl Worker for LinksToReferencesWorker {
    fn process_content(&self, content: &str, links: &mut LinkAppender) -> String {
        // issues first, so a later pull request reference can not claim them
        self.process_issues(content, links);
        self.process_pull_requests(content, links);
        self.process_commits(content, links);

        content.to_string()
    }

    fn priority(&self) -> i32 {
        700
    }

    fn name(&self) -> &'static str {
        "links_to_references"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPO: &str = "https://github.com/acme/widget";

    fn run(content: &str) -> (String, LinkAppender) {
        let mut links = LinkAppender::new();
        let output = LinksToReferencesWorker::new(REPO).process_content(content, &mut links);
        (output, links)
    }

    #[test]
    fn test_fixes_links_to_issue() {
        let (_, links) = run("- [#5] Fix crash, fixes [#12]");
        assert_eq!(
            links.get("#12"),
            Some("[#12]: https://github.com/acme/widget/issues/12")
        );
        assert_eq!(
            links.get("#5"),
            Some("[#5]: https://github.com/acme/widget/pull/5")
        );
    }

    #[test]
    fn test_resolves_links_to_issue() {
        let (_, links) = run("- Refactor loader, resolves [#7]");
        assert_eq!(
            links.get("#7"),
            Some("[#7]: https://github.com/acme/widget/issues/7")
        );
    }

    #[test]
    fn test_plain_reference_links_to_pull_request() {
        let (output, links) = run("Add feature [#45]");
        assert_eq!(output, "Add feature [#45]");
        assert_eq!(links.len(), 1);
        assert_eq!(
            links.get("#45"),
            Some("[#45]: https://github.com/acme/widget/pull/45")
        );
    }

    #[test]
    fn test_commit_reference() {
        let (_, links) = run("- [abc123def] Bump dependencies");
        assert_eq!(
            links.get("abc123def"),
            Some("[abc123def]: https://github.com/acme/widget/commit/abc123def")
        );
    }

    #[test]
    fn test_existing_links_are_not_references() {
        let (_, links) = run("See [abc1234](https://example.com) and\n[abc1234]: https://example.com");
        assert!(links.is_empty());

        let (_, links) = run("See [#12](https://example.com) and\n[#12]: https://example.com");
        assert!(links.is_empty());

        let (_, links) = run("- Patch, fixes [#7](https://example.com)\n[#7]: https://example.com");
        assert!(links.is_empty());
    }

    #[test]
    fn test_linked_reference_keeps_plain_neighbours() {
        let (_, links) = run("- [#3](https://example.com/3) Merge [#4]");
        let ids: Vec<_> = links.ids().collect();
        assert_eq!(ids, vec!["#4"]);
    }

    #[test]
    fn test_malformed_references_are_ignored() {
        let (_, links) = run("- [#] nothing [#12 open [ #13] [#99999999999]");
        assert!(links.is_empty());
    }

    #[test]
    fn test_link_order_is_first_seen() {
        let (_, links) = run("- [#3] Third, fixes [#1]\n- [#2] Second [deadbeef]");
        let ids: Vec<_> = links.ids().collect();
        assert_eq!(ids, vec!["#1", "#3", "#2", "deadbeef"]);
    }

    #[test]
    fn test_running_twice_is_idempotent() {
        let content = "- [#5] Fix crash, fixes [#12]\n- [abc123def] Bump\n- Add feature [#45]";
        let worker = LinksToReferencesWorker::new(REPO);

        let mut links = LinkAppender::new();
        let once = worker.process_content(content, &mut links);
        let first: Vec<String> = links.links().map(str::to_string).collect();

        let twice = worker.process_content(&once, &mut links);
        let second: Vec<String> = links.links().map(str::to_string).collect();

        assert_eq!(once, twice);
        assert_eq!(first, second);
    }
}
