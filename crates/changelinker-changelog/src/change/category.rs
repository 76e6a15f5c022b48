//! Category detection from an entry's wording

use regex::Regex;
use std::sync::LazyLock;

static CATEGORY_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        (
            CategoryResolver::ADDED,
            r"(?i)\b(add(s|ed|ing)?|introduce(s|d)?|new|support(s|ed)?|allow(s|ed)?|enable(s|d)?)\b",
        ),
        (
            CategoryResolver::FIXED,
            r"(?i)\b(fix(es|ed|ing)?|correct(s|ed)?|resolve(s|d)?|patch(es|ed)?)\b",
        ),
        (
            CategoryResolver::REMOVED,
            r"(?i)\b(remove(s|d)?|delete(s|d)?|drop(s|ped)?)\b",
        ),
        (CategoryResolver::DEPRECATED, r"(?i)\b(deprecate(s|d)?)\b"),
    ]
    .into_iter()
    .map(|(category, pattern)| (category, Regex::new(pattern).expect("Invalid regex")))
    .collect()
});

/// Picks the changelog category an entry belongs to
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryResolver;

impl CategoryResolver {
    pub const ADDED: &'static str = "Added";
    pub const CHANGED: &'static str = "Changed";
    pub const FIXED: &'static str = "Fixed";
    pub const REMOVED: &'static str = "Removed";
    pub const DEPRECATED: &'static str = "Deprecated";

    /// All categories, in the order they are usually listed
    pub const CATEGORIES: [&'static str; 5] = [
        Self::ADDED,
        Self::CHANGED,
        Self::FIXED,
        Self::REMOVED,
        Self::DEPRECATED,
    ];

    /// The category whose keyword appears first in the message,
    /// [`CategoryResolver::CHANGED`] when none does
    pub fn resolve(&self, message: &str) -> &'static str {
        CATEGORY_PATTERNS
            .iter()
            .filter_map(|(category, regex)| regex.find(message).map(|m| (m.start(), *category)))
            .min_by_key(|(start, _)| *start)
            .map(|(_, category)| category)
            .unwrap_or(Self::CHANGED)
    }

    /// The canonical spelling when `name` is a known category
    pub fn known(name: &str) -> Option<&'static str> {
        Self::CATEGORIES
            .iter()
            .find(|category| category.eq_ignore_ascii_case(name.trim()))
            .copied()
    }
}
