//! Named regex fragments shared by the workers and change resolvers

use regex::Regex;
use std::sync::LazyLock;

/// Regex fragments for the references a changelog can contain
pub struct RegexPattern;

impl RegexPattern {
    /// Issue or pull request number, `#123`
    pub const PR_OR_ISSUE: &'static str = r"#(?P<id>[0-9]+)";

    /// Abbreviated or full commit hash
    pub const COMMIT: &'static str = r"(?P<commit>[0-9a-f]{7,40})";

    /// GitHub style user handle, `@name`
    pub const USER: &'static str = r"@(?P<name>[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)";

    /// Level two headline holding a bracketed version, `## [v1.2.0]`
    pub const VERSION_HEADLINE: &'static str = r"(?m)^##\s+\[(?P<version>[^\]\s]+)\]";

    /// Reference link definition line, `[id]: target`
    pub const LINK_DEFINITION: &'static str = r"^\[(?P<id>[^\]]+)\]:\s+\S+";
}

/// Anchored variant of [`RegexPattern::COMMIT`] for whole-token checks
static COMMIT_TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^{}$", RegexPattern::COMMIT)).expect("Invalid regex"));

static LINK_DEFINITION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(RegexPattern::LINK_DEFINITION).expect("Invalid regex"));

/// Whether a bracketed token is a commit hash
pub fn is_commit_hash(token: &str) -> bool {
    COMMIT_TOKEN_REGEX.is_match(token)
}

/// The id of a link definition line, `None` for any other line
pub fn link_definition_id(line: &str) -> Option<&str> {
    LINK_DEFINITION_REGEX
        .captures(line.trim_end())
        .and_then(|caps| caps.name("id"))
        .map(|m| m.as_str())
}

/// Whether the bracketed reference ending at `end` is itself a link target
/// (`[x](url)`) or a definition (`[x]: url`) rather than a usage
pub(crate) fn is_link_syntax_after(content: &str, end: usize) -> bool {
    content[end..].starts_with(&['(', ':'][..])
}
