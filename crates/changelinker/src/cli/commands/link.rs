//! Link command

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use changelinker_changelog::{ChangelogLinker, LinkAppender};
use changelinker_core::config::load_config_or_default;
use changelinker_core::error::ChangelogError;

use super::linker_settings;
use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

/// Turn issue, pull request, commit, user and version references into links
#[derive(Debug, Args)]
pub struct LinkCommand {
    /// Changelog to process (defaults to the configured changelog file)
    pub file: Option<PathBuf>,

    /// Print the result instead of writing the file
    #[arg(long)]
    pub dry_run: bool,

    /// Repository web URL (defaults to config, then the configured remote)
    #[arg(long, value_name = "URL")]
    pub repository_url: Option<String>,
}

impl LinkCommand {
    /// Execute the link command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(file = ?self.file, dry_run = self.dry_run, "executing link command");
        let cwd = std::env::current_dir()?;
        let (config, _) = load_config_or_default(&cwd)?;

        let path = self
            .file
            .clone()
            .unwrap_or_else(|| cwd.join(&config.changelog.file));
        if !path.exists() {
            return Err(ChangelogError::FileNotFound(path).into());
        }

        let settings = linker_settings(&config, &cwd, self.repository_url.as_deref())?;
        let linker = ChangelogLinker::from_settings(&settings);

        let original = std::fs::read_to_string(&path)?;
        let document = linker.link(&original);
        let processed = document.content.as_str();
        let changed = processed != original;
        let references = references(&document.links);

        if self.dry_run {
            match cli.format {
                OutputFormat::Json => {
                    let report = serde_json::json!({
                        "file": path.display().to_string(),
                        "changed": changed,
                        "references": references,
                        "content": processed,
                    });
                    output::json(&report)?;
                }
                OutputFormat::Text => print!("{}", processed),
            }
            return Ok(());
        }

        if changed {
            std::fs::write(&path, processed)
                .map_err(|e| ChangelogError::WriteFailed(format!("{}: {}", path.display(), e)))?;
        }

        match cli.format {
            OutputFormat::Json => {
                let report = serde_json::json!({
                    "file": path.display().to_string(),
                    "changed": changed,
                    "references": references,
                });
                output::json(&report)?;
            }
            OutputFormat::Text if !cli.quiet => {
                let location = output::path(&path);
                if changed {
                    output::success(&format!("Linked references in {}", location));
                } else {
                    output::info(&format!("{} is already up to date", location));
                }
            }
            OutputFormat::Text => {}
        }

        Ok(())
    }
}

/// Generated reference id → definition line
fn references(links: &LinkAppender) -> serde_json::Map<String, serde_json::Value> {
    links
        .ids()
        .filter_map(|id| {
            let line = links.get(id)?;
            Some((id.to_string(), serde_json::Value::from(line)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_references_map_ids_to_definitions() {
        let mut links = LinkAppender::new();
        links.add("#9", "[#9]: https://github.com/acme/widget/issues/9");
        links.add("@alice", "[@alice]: https://github.com/alice");

        let references = references(&links);
        let ids: Vec<_> = references.keys().map(String::as_str).collect();
        assert_eq!(ids, vec!["#9", "@alice"]);
        assert_eq!(references["@alice"], "[@alice]: https://github.com/alice");
    }
}
