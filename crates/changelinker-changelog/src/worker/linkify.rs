//! Links configured names (projects, tools) wherever they are mentioned

use std::collections::BTreeMap;

use regex::{Captures, Regex};
use tracing::warn;

use super::Worker;
use crate::link_appender::LinkAppender;
use crate::pattern::is_link_syntax_after;

/// Wraps each configured name in brackets and registers its URL
#[derive(Debug, Clone)]
pub struct LinkifyWorker {
    names: Vec<(String, String, Regex)>,
}

impl LinkifyWorker {
    pub fn new(names_to_urls: BTreeMap<String, String>) -> Self {
        let names = names_to_urls
            .into_iter()
            .filter_map(|(name, url)| {
                let pattern = format!(r"(?m)(?P<before>^|[^\[\w/.])(?P<name>{})", regex::escape(&name));
                match Regex::new(&pattern) {
                    Ok(regex) => Some((name, url, regex)),
                    Err(e) => {
                        warn!(name = %name, error = %e, "skipping name that can not be matched");
                        None
                    }
                }
            })
            .collect();

        Self { names }
    }
}

impl Worker for LinkifyWorker {
    fn process_content(&self, content: &str, links: &mut LinkAppender) -> String {
        let mut content = content.to_string();

        for (name, url, regex) in &self.names {
            let current = content.as_str();
            let replaced = regex
                .replace_all(current, |caps: &Captures| {
                    let whole = &caps[0];
                    let end = caps.get(0).map_or(current.len(), |m| m.end());
                    // only whole words are linked
                    let glued = current[end..]
                        .chars()
                        .next()
                        .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == ']');
                    if glued {
                        whole.to_string()
                    } else {
                        format!("{}[{}]", &caps["before"], &caps["name"])
                    }
                })
                .into_owned();
            content = replaced;

            let label = format!("[{}]", name);
            let used = content
                .match_indices(&label)
                .any(|(start, _)| !is_link_syntax_after(&content, start + label.len()));
            if used {
                links.add(name.as_str(), format!("[{}]: {}", name, url));
            }
        }

        content
    }

    fn priority(&self) -> i32 {
        400
    }

    fn name(&self) -> &'static str {
        "linkify"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn worker() -> LinkifyWorker {
        let mut names = BTreeMap::new();
        names.insert("Rector".to_string(), "https://github.com/rectorphp/rector".to_string());
        names.insert("C++".to_string(), "https://isocpp.org".to_string());
        LinkifyWorker::new(names)
    }

    fn run(content: &str) -> (String, LinkAppender) {
        let mut links = LinkAppender::new();
        let output = worker().process_content(content, &mut links);
        (output, links)
    }

    #[test]
    fn test_links_configured_names() {
        let (output, links) = run("- Add Rector support");
        assert_eq!(output, "- Add [Rector] support");
        assert_eq!(
            links.get("Rector"),
            Some("[Rector]: https://github.com/rectorphp/rector")
        );
    }

    #[test]
    fn test_names_with_symbols() {
        let (output, links) = run("- Port to C++");
        assert_eq!(output, "- Port to [C++]");
        assert!(links.has_id("C++"));
    }

    #[test]
    fn test_partial_words_and_urls_are_untouched() {
        let (output, links) = run("- Rename Rectorify, see https://x.dev/Rector");
        assert_eq!(output, "- Rename Rectorify, see https://x.dev/Rector");
        assert!(links.is_empty());
    }

    #[test]
    fn test_idempotent() {
        let (once, _) = run("- Add Rector support");
        let (twice, links) = run(&once);
        assert_eq!(once, twice);
        assert_eq!(links.len(), 1);
    }
}
