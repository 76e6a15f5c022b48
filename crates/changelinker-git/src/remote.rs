//! Remote lookups

use tracing::debug;

use crate::repository::{GitRepo, Result};
use changelinker_core::error::GitError;

impl GitRepo {
    /// Get the URL for a remote
    pub fn remote_url(&self, name: &str) -> Result<Option<String>> {
        match self.repo.find_remote(name) {
            Ok(remote) => Ok(remote.url().map(|s| s.to_string())),
            Err(e) if e.code() == git2::ErrorCode::NotFound => {
                Err(GitError::RemoteNotFound(name.to_string()))
            }
            Err(e) => Err(GitError::Git2(e)),
        }
    }

    /// Browser URL of a remote, e.g. `https://github.com/owner/repo`
    pub fn remote_web_url(&self, name: &str) -> Result<Option<String>> {
        let url = self.remote_url(name)?;
        let web = url.as_deref().and_then(remote_to_web_url);
        debug!(remote = name, url = ?url, web = ?web, "resolved remote web url");
        Ok(web)
    }
}

/// Turn a clone URL into the https URL of the repository page.
///
/// Handles `https://host/owner/repo(.git)`, `git@host:owner/repo(.git)` and
/// `ssh://git@host(:port)/owner/repo(.git)`. Anything else yields `None`.
pub fn remote_to_web_url(url: &str) -> Option<String> {
    let url = url.trim();

    let (host, path) = if let Some(rest) = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
    {
        let rest = rest.rsplit_once('@').map_or(rest, |(_, r)| r);
        rest.split_once('/')?
    } else if let Some(rest) = url.strip_prefix("ssh://") {
        let rest = rest.rsplit_once('@').map_or(rest, |(_, r)| r);
        let (host, path) = rest.split_once('/')?;
        (host.split(':').next()?, path)
    } else if let Some((user_host, path)) = url.split_once(':') {
        let host = user_host.rsplit_once('@').map_or(user_host, |(_, h)| h);
        (host, path)
    } else {
        return None;
    };

    let path = path.trim_end_matches('/');
    let path = path.strip_suffix(".git").unwrap_or(path);
    if host.is_empty() || path.is_empty() {
        return None;
    }

    Some(format!("https://{}/{}", host, path))
}
