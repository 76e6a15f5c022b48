//! Commit history operations

use git2::{Oid, Sort};
use tracing::{debug, instrument};

use crate::repository::{GitRepo, Result};
use crate::tags::commit_time;
use crate::types::CommitInfo;
use changelinker_core::error::GitError;

impl GitRepo {
    /// Commits reachable from HEAD but not from the given tag, newest first
    #[instrument(skip(self))]
    pub fn commits_since_tag(&self, tag_name: &str) -> Result<Vec<CommitInfo>> {
        let tag_ref = format!("refs/tags/{}", tag_name);
        let reference = self.repo.find_reference(&tag_ref).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                GitError::TagNotFound(tag_name.to_string())
            } else {
                GitError::Git2(e)
            }
        })?;
        let target = reference.peel_to_commit()?;

        self.walk(Some(target.id()))
    }

    /// All commits reachable from HEAD, newest first
    pub fn all_commits(&self) -> Result<Vec<CommitInfo>> {
        self.walk(None)
    }

    fn walk(&self, hide: Option<Oid>) -> Result<Vec<CommitInfo>> {
        let head = self.head_commit()?;

        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(head.id())?;
        if let Some(hide) = hide {
            revwalk.hide(hide)?;
        }

        let mut commits = Vec::new();
        for oid in revwalk {
            let commit = self.repo.find_commit(oid?)?;
            commits.push(commit_to_info(&commit));
        }

        debug!(count = commits.len(), "walked commits");
        Ok(commits)
    }
}

/// Convert a git2 Commit to CommitInfo
fn commit_to_info(commit: &git2::Commit<'_>) -> CommitInfo {
    let author = commit.author();

    let message = commit.summary().unwrap_or("(no message)").to_string();
    let body = commit.body().map(|b| b.to_string()).unwrap_or_default();

    CommitInfo::new(
        commit.id().to_string(),
        message,
        author.name().unwrap_or("Unknown"),
        author.email().unwrap_or("unknown@example.com"),
        commit_time(commit),
    )
    .with_body(body)
    .with_parent_count(commit.parent_count())
}
