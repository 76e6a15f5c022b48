//! Tag lookups

use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};
use git2::Oid;
use semver::Version;
use tracing::{debug, instrument};

use crate::repository::{GitRepo, Result};
use crate::types::TagInfo;

impl GitRepo {
    /// All tags, peeled to the commit they point at, oldest commit first.
    ///
    /// Tags on the same commit are ordered by version, then by name.
    #[instrument(skip(self))]
    pub fn tags(&self) -> Result<Vec<TagInfo>> {
        let mut tags = Vec::new();

        for name in self.repo.tag_names(None)?.iter().flatten() {
            let reference = self.repo.find_reference(&format!("refs/tags/{}", name))?;
            let object = reference.peel(git2::ObjectType::Any)?;

            // Tags pointing at trees or blobs have no date to offer
            let Ok(commit) = object.peel_to_commit() else {
                debug!(tag = name, "skipping tag that does not point at a commit");
                continue;
            };

            let mut tag_info =
                TagInfo::new(name, commit.id().to_string()).with_timestamp(commit_time(&commit));

            if let Ok(annotated) = reference.peel_to_tag() {
                if let Some(msg) = annotated.message() {
                    tag_info = tag_info.with_message(msg.trim());
                }
            }

            tags.push(tag_info);
        }

        tags.sort_by(|a, b| {
            a.timestamp
                .cmp(&b.timestamp)
                .then_with(|| parsed_version(a).cmp(&parsed_version(b)))
                .then_with(|| a.name.cmp(&b.name))
        });

        debug!(count = tags.len(), "listed all tags");
        Ok(tags)
    }

    /// The first tag (in the order given) whose commit is the given commit
    /// or one of its descendants, i.e. the release that shipped it.
    ///
    /// Pass the result of [`GitRepo::tags`] so the tag list is read once
    /// for a whole batch of commits.
    pub fn tag_containing<'t>(&self, hash: &str, tags: &'t [TagInfo]) -> Result<Option<&'t TagInfo>> {
        let commit = Oid::from_str(hash)?;

        for tag in tags {
            let tagged = Oid::from_str(&tag.commit_hash)?;
            if tagged == commit || self.repo.graph_descendant_of(tagged, commit)? {
                return Ok(Some(tag));
            }
        }

        Ok(None)
    }
}

fn parsed_version(tag: &TagInfo) -> Option<Version> {
    tag.version.as_deref().and_then(|v| Version::parse(v).ok())
}

/// Commit time in the committer's own timezone
pub(crate) fn commit_time(commit: &git2::Commit<'_>) -> DateTime<FixedOffset> {
    let time = commit.time();
    let offset = FixedOffset::east_opt(time.offset_minutes() * 60).unwrap_or(Utc.fix());
    offset
        .timestamp_opt(time.seconds(), 0)
        .single()
        .unwrap_or_else(|| Utc::now().with_timezone(&offset))
}
