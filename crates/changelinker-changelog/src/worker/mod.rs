//! Text rewriting workers and the pipeline that runs them

mod brackets_around_references;
mod diff_links_to_versions;
mod linkify;
mod links_to_references;
mod user_references;
mod whitespace;

pub use brackets_around_references::BracketsAroundReferencesWorker;
pub use diff_links_to_versions::DiffLinksToVersionsWorker;
pub use linkify::LinkifyWorker;
pub use links_to_references::LinksToReferencesWorker;
pub use user_references::UserReferencesWorker;
pub use whitespace::WhitespaceWorker;

use std::cmp::Reverse;
use std::collections::BTreeMap;

use changelinker_core::config::{normalize_repository_url, validate_http_url, Config};
use changelinker_core::error::ChangelogError;
use changelinker_core::{LinkerError, Result};
use tracing::{debug, instrument};
use url::Url;

use crate::link_appender::LinkAppender;

/// One textual transformation of the changelog
pub trait Worker: Send + Sync {
    /// Rewrite the content, registering any link definitions it relies on
    fn process_content(&self, content: &str, links: &mut LinkAppender) -> String;

    /// Workers with a higher priority run first
    fn priority(&self) -> i32;

    /// Name used in logs
    fn name(&self) -> &'static str;
}

/// URLs the standard workers link against
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkerSettings {
    /// Web URL of the repository, without a trailing slash
    pub repository_url: String,

    /// Scheme and host of the repository URL, where user profiles live
    pub profile_base_url: String,

    /// Names linked wherever they appear
    pub names_to_urls: BTreeMap<String, String>,
}

impl LinkerSettings {
    /// Settings for a repository web URL
    pub fn new(repository_url: &str) -> Result<Self> {
        let repository_url = normalize_repository_url(repository_url);
        validate_http_url("repository_url", &repository_url)?;

        let profile_base_url = Url::parse(&repository_url)
            .and_then(|url| url.join("/"))
            .map(|url| url.as_str().trim_end_matches('/').to_string())
            .map_err(|e| LinkerError::other(e.to_string()))?;

        Ok(Self {
            repository_url,
            profile_base_url,
            names_to_urls: BTreeMap::new(),
        })
    }

    /// Settings from the config; `fallback_url` (usually the remote's web
    /// URL) is used when the config names no repository
    pub fn from_config(config: &Config, fallback_url: Option<&str>) -> Result<Self> {
        let repository_url = config
            .normalized_repository_url()
            .or_else(|| fallback_url.map(str::to_string))
            .ok_or(ChangelogError::MissingRepositoryUrl)?;

        Ok(Self::new(&repository_url)?.with_names_to_urls(config.names_to_urls.clone()))
    }

    pub fn with_names_to_urls(mut self, names_to_urls: BTreeMap<String, String>) -> Self {
        self.names_to_urls = names_to_urls;
        self
    }
}

/// Workers in the order they run, fixed at construction
pub struct Pipeline {
    workers: Vec<Box<dyn Worker>>,
}

impl Pipeline {
    /// Order the workers by descending priority; equal priorities keep the
    /// order they were given in
    pub fn new(mut workers: Vec<Box<dyn Worker>>) -> Self {
        workers.sort_by_key(|worker| Reverse(worker.priority()));
        Self { workers }
    }

    /// The full set of workers for a repository
    pub fn standard(settings: &LinkerSettings) -> Self {
        Self::new(vec![
            Box::new(BracketsAroundReferencesWorker),
            Box::new(LinksToReferencesWorker::new(&settings.repository_url)),
            Box::new(UserReferencesWorker::new(&settings.profile_base_url)),
            Box::new(DiffLinksToVersionsWorker::new(&settings.repository_url)),
            Box::new(LinkifyWorker::new(settings.names_to_urls.clone())),
            Box::new(WhitespaceWorker),
        ])
    }

    /// Run every worker over the output of the previous one
    #[instrument(skip(self, content), fields(content_len = content.len(), workers = self.workers.len()))]
    pub fn run(&self, content: &str) -> (String, LinkAppender) {
        let mut links = LinkAppender::new();
        let mut content = content.to_string();

        for worker in &self.workers {
            content = worker.process_content(&content, &mut links);
            debug!(worker = worker.name(), links = links.len(), "worker finished");
        }

        (content, links)
    }

    /// Worker names in run order
    pub fn worker_names(&self) -> Vec<&'static str> {
        self.workers.iter().map(|worker| worker.name()).collect()
    }
}
