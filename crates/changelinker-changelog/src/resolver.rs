//! Tag → release date lookups used for `## <tag> - <date>` headlines

use std::collections::HashMap;

use changelinker_git::GitRepo;
use tracing::{debug, instrument, warn};

/// Resolves the release date of a tag
pub trait TagDateResolver {
    /// `YYYY-MM-DD` date for the tag, `None` when it is unknown
    fn resolve_date_for_tag(&self, tag: &str) -> Option<String>;
}

/// Resolver that knows no dates; headlines carry only the tag
#[derive(Debug, Clone, Copy, Default)]
pub struct NoTagDates;

impl TagDateResolver for NoTagDates {
    fn resolve_date_for_tag(&self, _tag: &str) -> Option<String> {
        None
    }
}

/// Fixed tag → date table
#[derive(Debug, Clone, Default)]
pub struct StaticTagDates {
    dates: HashMap<String, String>,
}

impl StaticTagDates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a date for a tag
    pub fn with_date(mut self, tag: impl Into<String>, date: impl Into<String>) -> Self {
        self.dates.insert(tag.into(), date.into());
        self
    }
}

impl TagDateResolver for StaticTagDates {
    fn resolve_date_for_tag(&self, tag: &str) -> Option<String> {
        self.dates.get(tag).cloned()
    }
}

/// Dates taken from the commit each tag points at.
///
/// All tags are read once when the resolver is built; a repository that
/// cannot be read yields a resolver with no dates.
#[derive(Debug, Clone, Default)]
pub struct GitCommitDateTagResolver {
    dates: HashMap<String, String>,
}

impl GitCommitDateTagResolver {
    #[instrument(skip(repo), fields(path = %repo.path().display()))]
    pub fn from_repo(repo: &GitRepo) -> Self {
        let tags = match repo.tags() {
            Ok(tags) => tags,
            Err(e) => {
                warn!(error = %e, "could not read tags, headlines will have no dates");
                return Self::default();
            }
        };

        let dates: HashMap<String, String> = tags
            .into_iter()
            .filter_map(|tag| {
                let date = tag.date()?;
                Some((tag.name, date))
            })
            .collect();

        debug!(count = dates.len(), "loaded tag dates");
        Self { dates }
    }
}

impl TagDateResolver for GitCommitDateTagResolver {
    fn resolve_date_for_tag(&self, tag: &str) -> Option<String> {
        self.dates.get(tag).cloned()
    }
}
