//! Orders changes so equal groups are contiguous

use std::cmp::Ordering;
use std::collections::HashMap;

use changelinker_core::SortPriority;
use tracing::{debug, instrument};

use crate::change::Change;

/// Sorts changes for grouped rendering
pub struct ChangeSorter;

impl ChangeSorter {
    /// Stable sort by the priority's primary then secondary dimension.
    ///
    /// Changes stay within their tag run: tags keep the order in which they
    /// first appear and sorting happens inside each tag. Absent packages and
    /// categories sort last. [`SortPriority::None`] keeps the input order.
    #[instrument(skip(changes), fields(count = changes.len()))]
    pub fn sort(changes: &[Change], priority: SortPriority) -> Vec<Change> {
        if priority == SortPriority::None {
            return changes.to_vec();
        }

        let mut tag_rank: HashMap<Option<&str>, usize> = HashMap::new();
        let mut ranked: Vec<(usize, &Change)> = Vec::with_capacity(changes.len());
        for change in changes {
            let next = tag_rank.len();
            let rank = *tag_rank.entry(change.tag()).or_insert(next);
            ranked.push((rank, change));
        }

        ranked.sort_by(|(rank_a, a), (rank_b, b)| {
            rank_a.cmp(rank_b).then_with(|| match priority {
                SortPriority::Packages => absent_last(a.package(), b.package())
                    .then_with(|| absent_last(a.category(), b.category())),
                SortPriority::Categories => absent_last(a.category(), b.category())
                    .then_with(|| absent_last(a.package(), b.package())),
                SortPriority::None => Ordering::Equal,
            })
        });

        debug!(%priority, "changes sorted");
        ranked.into_iter().map(|(_, change)| change.clone()).collect()
    }
}

fn absent_last(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
