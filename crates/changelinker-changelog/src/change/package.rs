//! Package detection from `[Package]` tokens

use std::collections::BTreeMap;

use regex::Regex;
use std::sync::LazyLock;

use crate::pattern::{is_commit_hash, is_link_syntax_after};

static PACKAGE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(?P<package>[A-Za-z][\w.-]*)\]").expect("Invalid regex"));

/// Finds the package an entry is about
#[derive(Debug, Clone, Default)]
pub struct PackageResolver {
    aliases: BTreeMap<String, String>,
}

/// A package token found in a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageToken {
    /// The token text as written, without brackets
    pub raw: String,
    /// The package name after alias resolution
    pub package: String,
}

impl PackageResolver {
    /// Resolver mapping `alias → package`
    pub fn new(aliases: BTreeMap<String, String>) -> Self {
        Self { aliases }
    }

    /// The first bracketed token that names a package.
    ///
    /// Commit hashes and bracketed link labels (`[x](url)`) are skipped.
    pub fn resolve(&self, message: &str) -> Option<PackageToken> {
        PACKAGE_REGEX.captures_iter(message).find_map(|caps| {
            let whole = caps.get(0)?;
            let raw = caps.name("package")?.as_str();
            if is_commit_hash(raw) || is_link_syntax_after(message, whole.end()) {
                return None;
            }

            let package = self
                .aliases
                .get(raw)
                .cloned()
                .unwrap_or_else(|| raw.to_string());

            Some(PackageToken {
                raw: raw.to_string(),
                package,
            })
        })
    }
}
