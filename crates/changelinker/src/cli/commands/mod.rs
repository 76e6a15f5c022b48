//! CLI commands

mod completions;
mod dump_merges;
mod init;
mod link;

pub use completions::CompletionsCommand;
pub use dump_merges::DumpMergesCommand;
pub use init::InitCommand;
pub use link::LinkCommand;

use std::path::Path;

use tracing::warn;

use changelinker_changelog::LinkerSettings;
use changelinker_core::config::Config;
use changelinker_git::GitRepo;

/// Link settings from an explicit URL, the config, or the configured remote,
/// in that order
pub(crate) fn linker_settings(
    config: &Config,
    cwd: &Path,
    repository_url: Option<&str>,
) -> anyhow::Result<LinkerSettings> {
    if let Some(url) = repository_url {
        return Ok(LinkerSettings::new(url)?.with_names_to_urls(config.names_to_urls.clone()));
    }

    let remote_url = if config.repository_url.is_some() {
        None
    } else {
        remote_web_url(config, cwd)
    };

    Ok(LinkerSettings::from_config(config, remote_url.as_deref())?)
}

fn remote_web_url(config: &Config, cwd: &Path) -> Option<String> {
    let repo = GitRepo::discover(cwd).ok()?;
    match repo.remote_web_url(&config.git.remote) {
        Ok(url) => url,
        Err(e) => {
            warn!(remote = %config.git.remote, error = %e, "could not read remote");
            None
        }
    }
}
