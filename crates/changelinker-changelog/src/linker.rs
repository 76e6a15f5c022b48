//! Rewrites a whole changelog document and appends its link block

use tracing::{info, instrument};

use crate::link_appender::LinkAppender;
use crate::pattern::link_definition_id;
use crate::worker::{LinkerSettings, Pipeline};

/// Runs the worker pipeline over a changelog and rebuilds the trailing
/// reference link block.
///
/// Processing an already processed document returns it unchanged.
pub struct ChangelogLinker {
    pipeline: Pipeline,
}

impl ChangelogLinker {
    pub fn new(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }

    /// Linker with the standard workers
    pub fn from_settings(settings: &LinkerSettings) -> Self {
        Self::new(Pipeline::standard(settings))
    }

    /// Process a document, returning only the rewritten text
    pub fn process_content(&self, content: &str) -> String {
        self.link(content).content
    }

    /// Process a document.
    ///
    /// Link definitions at the end of the document are set aside, the body
    /// runs through the pipeline and the block is rebuilt: generated links
    /// first, then the earlier definitions no worker generated again.
    #[instrument(skip(self, content), fields(content_len = content.len()))]
    pub fn link(&self, content: &str) -> LinkedDocument {
        let (body, existing) = split_link_block(content);
        let (body, links) = self.pipeline.run(&body);

        let kept: Vec<String> = existing
            .into_iter()
            .filter(|line| link_definition_id(line).is_some_and(|id| !links.has_id(id)))
            .collect();
        info!(generated = links.len(), kept = kept.len(), "link block rebuilt");

        let mut block = links.content();
        for line in &kept {
            if !block.is_empty() {
                block.push('\n');
            }
            block.push_str(line);
        }

        let body = body.trim_end();
        let mut output = String::with_capacity(body.len() + block.len() + 3);
        output.push_str(body);
        if !block.is_empty() {
            if !output.is_empty() {
                output.push_str("\n\n");
            }
            output.push_str(&block);
        }
        if !output.is_empty() {
            output.push('\n');
        }

        LinkedDocument {
            content: output,
            links,
        }
    }
}

/// A processed document and the links generated for it
#[derive(Debug, Clone)]
pub struct LinkedDocument {
    /// Rewritten document including its link block
    pub content: String,
    /// Links generated in this run, without the kept older definitions
    pub links: LinkAppender,
}

/// Split trailing `[id]: target` lines (and the blank lines between them)
/// from the rest of the document
fn split_link_block(content: &str) -> (String, Vec<String>) {
    let lines: Vec<&str> = content.lines().collect();

    let mut start = lines.len();
    while start > 0 {
        let line = lines[start - 1].trim_end();
        if line.is_empty() || link_definition_id(line).is_some() {
            start -= 1;
        } else {
            break;
        }
    }

    let definitions = lines[start..]
        .iter()
        .map(|line| line.trim_end())
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    (lines[..start].join("\n"), definitions)
}
