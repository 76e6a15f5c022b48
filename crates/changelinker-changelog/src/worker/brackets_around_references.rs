//! Wraps bare `#123` references in brackets

use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::Worker;
use crate::link_appender::LinkAppender;

static BARE_REFERENCE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)(?P<before>^|[\s(,])#(?P<id>[0-9]+)\b").expect("Invalid regex")
});

/// Turns `#123` into `[#123]` so the reference can be linked
#[derive(Debug, Clone, Copy, Default)]
pub struct BracketsAroundReferencesWorker;

impl Worker for BracketsAroundReferencesWorker {
    fn process_content(&self, content: &str, _links: &mut LinkAppender) -> String {
        BARE_REFERENCE_REGEX
            .replace_all(content, |caps: &Captures| {
                format!("{}[#{}]", &caps["before"], &caps["id"])
            })
            .into_owned()
    }

    fn priority(&self) -> i32 {
        900
    }

    fn name(&self) -> &'static str {
        "brackets_around_references"
    }
}
