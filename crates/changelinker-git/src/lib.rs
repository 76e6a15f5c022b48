//! Changelinker Git - Git access for changelog generation
//!
//! This crate reads what the changelog pipeline needs from a repository:
//! merge commits, the tag that first contains a commit, tag dates and the
//! web URL of a remote.

mod commits;
mod remote;
mod repository;
mod tags;
pub mod types;

pub use remote::remote_to_web_url;
pub use repository::{GitRepo, Result};
pub use types::{CommitInfo, TagInfo};
