//! Links `@user` mentions to user profiles

use regex::{Captures, Regex};
use std::sync::LazyLock;

use super::Worker;
use crate::link_appender::LinkAppender;
use crate::pattern::{is_link_syntax_after, RegexPattern};

/// A mention not glued to a word, so e-mail addresses stay untouched
static BARE_USER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?m)(?P<before>^|[\s(,]){}\b", RegexPattern::USER))
        .expect("Invalid regex")
});

static BRACKETED_USER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\[{}\]", RegexPattern::USER)).expect("Invalid regex")
});

/// Brackets bare `@user` mentions and links every `[@user]` to the profile
#[derive(Debug, Clone)]
pub struct UserReferencesWorker {
    profile_base_url: String,
}

impl UserReferencesWorker {
    pub fn new(profile_base_url: impl Into<String>) -> Self {
        Self {
            profile_base_url: profile_base_url.into(),
        }
    }
}

impl Worker for UserReferencesWorker {
    fn process_content(&self, content: &str, links: &mut LinkAppender) -> String {
        let content = BARE_USER_REGEX
            .replace_all(content, |caps: &Captures| {
                format!("{}[@{}]", &caps["before"], &caps["name"])
            })
            .into_owned();

        for caps in BRACKETED_USER_REGEX.captures_iter(&content) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.name("name")) else {
                continue;
            };
            if is_link_syntax_after(&content, whole.end()) {
                continue;
            }

            let name = name.as_str();
            links.add(
                format!("@{}", name),
                format!("[@{}]: {}/{}", name, self.profile_base_url, name),
            );
        }

        content
    }

    fn priority(&self) -> i32 {
        600
    }

    fn name(&self) -> &'static str {
        "user_references"
    }
}
