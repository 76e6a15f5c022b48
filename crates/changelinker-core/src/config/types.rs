//! Configuration types

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::types::SortPriority;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Version of the config schema
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Repository URL that references are resolved against,
    /// e.g. `https://github.com/owner/repo`
    pub repository_url: Option<String>,

    /// Changelog file configuration
    pub changelog: ChangelogConfig,

    /// Default grouping for `dump-merges`
    pub report: ReportConfig,

    /// Git configuration
    pub git: GitConfig,

    /// Authors that are not thanked in generated entries (bots, maintainers)
    pub authors_to_ignore: Vec<String>,

    /// Names that are turned into links wherever they appear
    pub names_to_urls: BTreeMap<String, String>,

    /// Alternative package spellings mapped to the canonical package name
    pub package_aliases: BTreeMap<String, String>,
}

impl Config {
    /// Repository URL without a trailing slash or `.git` suffix
    pub fn normalized_repository_url(&self) -> Option<String> {
        self.repository_url.as_deref().map(normalize_repository_url)
    }
}

/// Strip the decorations a repository URL is commonly written with
pub fn normalize_repository_url(url: &str) -> String {
    let url = url.trim().trim_end_matches('/');
    url.strip_suffix(".git").unwrap_or(url).to_string()
}

/// Changelog file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Changelog file path
    pub file: PathBuf,

    /// Line after which `dump-merges --in-changelog` inserts the report
    pub marker: String,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("CHANGELOG.md"),
            marker: "<!-- changelog-linker -->".to_string(),
        }
    }
}

/// Report grouping configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Group changes under category headlines
    pub in_categories: bool,

    /// Group changes under package headlines
    pub in_packages: bool,

    /// Group changes under tag headlines
    pub in_tags: bool,

    /// Which dimension is the outer group
    pub priority: SortPriority,

    /// Tag used for merges not contained in any tag yet
    pub unreleased_label: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            in_categories: true,
            in_packages: false,
            in_tags: true,
            priority: SortPriority::None,
            unreleased_label: "Unreleased".to_string(),
        }
    }
}

/// Git configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// Remote whose URL is used when `repository_url` is not set
    pub remote: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
        }
    }
}
