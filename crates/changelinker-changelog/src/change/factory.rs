//! Builds changes from merge commits and changelog lines

use regex::Regex;
use std::sync::LazyLock;

use changelinker_core::config::Config;
use changelinker_git::CommitInfo;
use tracing::debug;

use super::{CategoryResolver, Change, PackageResolver};

/// `Merge pull request #123 from user/branch`
static MERGE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^Merge pull request #(?P<id>[0-9]+) from (?P<user>[^/\s]+)/(?P<branch>\S+)")
        .expect("Invalid regex")
});

/// `Title of the change (#123)`, as written by squash merges
static SQUASH_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<title>.+?)\s+\(#(?P<id>[0-9]+)\)$").expect("Invalid regex")
});

/// Creates [`Change`] records with category and package resolved
#[derive(Debug, Clone, Default)]
pub struct ChangeFactory {
    category_resolver: CategoryResolver,
    package_resolver: PackageResolver,
    authors_to_ignore: Vec<String>,
}

impl ChangeFactory {
    /// Factory configured with package aliases and ignored authors
    pub fn new(config: &Config) -> Self {
        Self {
            category_resolver: CategoryResolver,
            package_resolver: PackageResolver::new(config.package_aliases.clone()),
            authors_to_ignore: config.authors_to_ignore.clone(),
        }
    }

    /// Change for a pull request merge commit, `None` for other commits
    pub fn from_merge_commit(&self, commit: &CommitInfo, tag: Option<&str>) -> Option<Change> {
        let merge = MERGE_REGEX
            .captures(&commit.message)
            .filter(|_| commit.is_merge());

        let (id, title, user) = if let Some(caps) = merge {
            let title = commit
                .body
                .as_deref()
                .and_then(|body| body.lines().map(str::trim).find(|l| !l.is_empty()))
                .unwrap_or(&caps["branch"])
                .to_string();
            (caps["id"].to_string(), title, Some(caps["user"].to_string()))
        } else if let Some(caps) = SQUASH_REGEX.captures(&commit.message) {
            (caps["id"].to_string(), caps["title"].to_string(), None)
        } else {
            debug!(hash = %commit.short_hash, "commit is not a pull request merge");
            return None;
        };

        let mut message = format!("- [#{}] {}", id, title);
        if let Some(user) = user.filter(|u| !self.is_ignored_author(u)) {
            message.push_str(&format!(", Thanks to @{}", user));
        }

        Some(self.create(message, tag, None))
    }

    /// Change for a `- ` or `* ` bullet line, `None` for any other line
    pub fn from_line(&self, line: &str, tag: Option<&str>) -> Option<Change> {
        self.from_line_in_category(line, tag, None)
    }

    /// Like [`ChangeFactory::from_line`], with the category already known
    /// from the section the line was found in
    pub fn from_line_in_category(
        &self,
        line: &str,
        tag: Option<&str>,
        category: Option<&str>,
    ) -> Option<Change> {
        let line = line.trim();
        let text = line
            .strip_prefix("- ")
            .or_else(|| line.strip_prefix("* "))?
            .trim();
        if text.is_empty() {
            return None;
        }

        Some(self.create(format!("- {}", text), tag, category))
    }

    fn create(&self, message: String, tag: Option<&str>, category: Option<&str>) -> Change {
        let category = category
            .map(str::to_string)
            .unwrap_or_else(|| self.category_resolver.resolve(&message).to_string());

        let (message, package) = match self.package_resolver.resolve(&message) {
            Some(token) => {
                // spell the token the way its headline will be spelled
                let message = if token.raw == token.package {
                    message
                } else {
                    message.replacen(
                        &format!("[{}]", token.raw),
                        &format!("[{}]", token.package),
                        1,
                    )
                };
                (message, Some(token.package))
            }
            None => (message, None),
        };

        Change::new(message, tag.map(str::to_string), Some(category), package)
    }

    fn is_ignored_author(&self, user: &str) -> bool {
        self.authors_to_ignore
            .iter()
            .any(|ignored| ignored.eq_ignore_ascii_case(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn commit(message: &str, body: &str) -> CommitInfo {
        let time = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
            .unwrap();
        CommitInfo::new("abc1234567890", message, "Alice", "alice@example.com", time)
            .with_body(body)
            .with_parent_count(2)
    }

    #[test]
    fn test_from_merge_commit() {
        let factory = ChangeFactory::default();
        let change = factory
            .from_merge_commit(
                &commit("Merge pull request #45 from alice/feature", "[Console] Add progress bar"),
                Some("v1.1.0"),
            )
            .unwrap();

        assert_eq!(
            change.message(),
            "- [#45] [Console] Add progress bar, Thanks to @alice"
        );
        assert_eq!(
            change.message_without_package(),
            "- [#45] Add progress bar, Thanks to @alice"
        );
        assert_eq!(change.package(), Some("Console"));
        assert_eq!(change.category(), Some("Added"));
        assert_eq!(change.tag(), Some("v1.1.0"));
    }

    #[test]
    fn test_ignored_author_is_not_thanked() {
        let mut config = Config::default();
        config.authors_to_ignore = vec!["Alice".to_string()];
        let factory = ChangeFactory::new(&config);

        let change = factory
            .from_merge_commit(&commit("Merge pull request #45 from alice/feature", "Fix typo"), None)
            .unwrap();
        assert_eq!(change.message(), "- [#45] Fix typo");
    }

    #[test]
    fn test_from_squash_commit() {
        let factory = ChangeFactory::default();
        let change = factory
            .from_merge_commit(&commit("Remove legacy loader (#77)", ""), None)
            .unwrap();
        assert_eq!(change.message(), "- [#77] Remove legacy loader");
        assert_eq!(change.category(), Some("Removed"));
    }

    #[test]
    fn test_plain_commit_is_skipped() {
        let factory = ChangeFactory::default();
        assert!(factory.from_merge_commit(&commit("Update README", ""), None).is_none());
    }

    #[test]
    fn test_merge_message_on_single_parent_commit_is_skipped() {
        let factory = ChangeFactory::default();
        let copied = commit("Merge pull request #9 from bob/fix-docs", "Fix docs").with_parent_count(1);
        assert!(factory.from_merge_commit(&copied, None).is_none());
    }

    #[test]
    fn test_merge_without_body_uses_branch() {
        let factory = ChangeFactory::default();
        let change = factory
            .from_merge_commit(&commit("Merge pull request #9 from bob/fix-docs", ""), None)
            .unwrap();
        assert_eq!(change.message(), "- [#9] fix-docs, Thanks to @bob");
    }

    #[test]
    fn test_alias_is_canonicalised() {
        let mut config = Config::default();
        config
            .package_aliases
            .insert("ECS".to_string(), "EasyCodingStandard".to_string());
        let factory = ChangeFactory::new(&config);

        let change = factory.from_line("* [ECS] Add sniff", None).unwrap();
        assert_eq!(change.message(), "- [EasyCodingStandard] Add sniff");
        assert_eq!(change.message_without_package(), "- Add sniff");
        assert_eq!(change.package(), Some("EasyCodingStandard"));
    }

    #[test]
    fn test_from_line_rejects_non_bullets() {
        let factory = ChangeFactory::default();
        assert!(factory.from_line("## v1.0.0", None).is_none());
        assert!(factory.from_line("-", None).is_none());
        assert!(factory.from_line("Some paragraph", None).is_none());
    }

    #[test]
    fn test_from_line_with_known_category() {
        let factory = ChangeFactory::default();
        let change = factory
            .from_line_in_category("- Add sniff", None, Some("Fixed"))
            .unwrap();
        assert_eq!(change.category(), Some("Fixed"));
    }
}
