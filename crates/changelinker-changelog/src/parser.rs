//! Splits changelog text into change records

use regex::Regex;
use std::sync::LazyLock;

use tracing::{debug, instrument};

use crate::change::{CategoryResolver, Change, ChangeFactory};

static TAG_HEADLINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^##\s+(?P<tag>\S.*)$").expect("Invalid regex"));

static SUB_HEADLINE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#{3,6}\s+(?P<title>\S.*)$").expect("Invalid regex"));

/// Parse bullet lines into changes.
///
/// Bullets below a `## <tag>` headline carry that tag (date suffix and
/// brackets removed); bullets below a `### <Category>` headline naming a
/// known category keep that category. Everything else is ignored.
#[instrument(skip(content, factory), fields(content_len = content.len()))]
pub fn parse_changes(content: &str, factory: &ChangeFactory) -> Vec<Change> {
    let mut changes = Vec::new();
    let mut tag: Option<String> = None;
    let mut category: Option<&'static str> = None;

    for line in content.lines() {
        let line = line.trim_end();

        if let Some(caps) = TAG_HEADLINE_REGEX.captures(line) {
            tag = Some(tag_from_headline(&caps["tag"]));
            category = None;
            continue;
        }

        if let Some(caps) = SUB_HEADLINE_REGEX.captures(line) {
            category = CategoryResolver::known(&caps["title"]);
            continue;
        }

        if let Some(change) = factory.from_line_in_category(line, tag.as_deref(), category) {
            changes.push(change);
        }
    }

    debug!(count = changes.len(), "parsed changes");
    changes
}

/// `[v1.2.0] - 2024-01-01` → `v1.2.0`
fn tag_from_headline(headline: &str) -> String {
    let tag = headline.split(" - ").next().unwrap_or(headline).trim();
    let tag = tag
        .strip_prefix('[')
        .and_then(|t| t.strip_suffix(']'))
        .unwrap_or(tag);
    tag.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = "# Changelog

## Unreleased

- [#5] Add cache

## [v1.1.0] - 2024-02-01

### Fixed

- [#4] Handle empty files
- [#3] Add missing test

Some prose that is not an entry.

## v1.0.0

* [#1] [Console] Initial release
";

    #[test]
    fn test_parse_tags_and_entries() {
        let changes = parse_changes(INPUT, &ChangeFactory::default());
        assert_eq!(changes.len(), 4);

        assert_eq!(changes[0].tag(), Some("Unreleased"));
        assert_eq!(changes[1].tag(), Some("v1.1.0"));
        assert_eq!(changes[3].tag(), Some("v1.0.0"));
        assert_eq!(changes[3].message(), "- [#1] [Console] Initial release");
        assert_eq!(changes[3].package(), Some("Console"));
    }

    #[test]
    fn test_category_from_section() {
        let changes = parse_changes(INPUT, &ChangeFactory::default());
        // wording says "Add" but the section says Fixed
        assert_eq!(changes[2].category(), Some("Fixed"));
        // new tag resets the section category
        assert_eq!(changes[3].category(), Some("Changed"));
    }

    #[test]
    fn test_untagged_entries() {
        let changes = parse_changes("- Add cache\n- Remove loader\n", &ChangeFactory::default());
        assert_eq!(changes.len(), 2);
        assert!(changes.iter().all(|c| c.tag().is_none()));
    }

    #[test]
    fn test_tag_from_headline() {
        assert_eq!(tag_from_headline("[v1.2.0] - 2024-01-01"), "v1.2.0");
        assert_eq!(tag_from_headline("v1.2.0"), "v1.2.0");
        assert_eq!(tag_from_headline("Unreleased"), "Unreleased");
    }
}
