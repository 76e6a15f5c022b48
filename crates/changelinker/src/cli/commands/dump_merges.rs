//! Dump merges command

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::{debug, info, warn};

use changelinker_changelog::{
    parse_changes, Change, ChangeFactory, ChangeSorter, DumpMergesReporter,
    GitCommitDateTagResolver, NoTagDates, RenderState, ReportOptions, TagDateResolver,
};
use changelinker_core::config::{load_config_or_default, Config};
use changelinker_core::error::ChangelogError;
use changelinker_core::SortPriority;
use changelinker_git::GitRepo;

use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

/// Render merged pull requests as grouped changelog sections
#[derive(Debug, Args)]
pub struct DumpMergesCommand {
    /// Only merges after this tag
    #[arg(long, value_name = "TAG")]
    pub since_tag: Option<String>,

    /// Read entries from a changelog-style file instead of git history
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Group under category headlines
    #[arg(long)]
    pub in_categories: bool,

    /// Group under package headlines
    #[arg(long)]
    pub in_packages: bool,

    /// Group under tag headlines
    #[arg(long)]
    pub in_tags: bool,

    /// Outer grouping when both categories and packages are shown
    #[arg(long, value_name = "PRIORITY")]
    pub priority: Option<SortPriority>,

    /// Insert the report into the changelog below its marker
    #[arg(long)]
    pub in_changelog: bool,

    /// With --in-changelog, print the updated changelog instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}

impl DumpMergesCommand {
    /// Execute the dump-merges command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            since_tag = ?self.since_tag,
            input = ?self.input,
            in_changelog = self.in_changelog,
            "executing dump-merges command"
        );
        let cwd = std::env::current_dir()?;
        let (config, _) = load_config_or_default(&cwd)?;
        let options = self.report_options(&config);
        let factory = ChangeFactory::new(&config);

        let (changes, resolver) = match &self.input {
            Some(input) => {
                let content = std::fs::read_to_string(input)
                    .map_err(|_| ChangelogError::FileNotFound(input.clone()))?;
                let resolver: Box<dyn TagDateResolver> = match GitRepo::discover(&cwd) {
                    Ok(repo) => Box::new(GitCommitDateTagResolver::from_repo(&repo)),
                    Err(_) => Box::new(NoTagDates),
                };
                (parse_changes(&content, &factory), resolver)
            }
            None => {
                let repo = GitRepo::discover(&cwd)?;
                let changes = merged_changes(&repo, &factory, self.since_tag.as_deref())?;
                let resolver: Box<dyn TagDateResolver> =
                    Box::new(GitCommitDateTagResolver::from_repo(&repo));
                (changes, resolver)
            }
        };

        let changes = ChangeSorter::sort(&changes, options.priority);

        if changes.is_empty() {
            if !cli.quiet && cli.format == OutputFormat::Text {
                output::warning("No merged pull requests found.");
            }
            if cli.format == OutputFormat::Json {
                println!("[]");
            }
            return Ok(());
        }

        if cli.format == OutputFormat::Json && !self.in_changelog {
            output::json(&serde_json::to_value(&changes)?)?;
            return Ok(());
        }

        let mut reporter = DumpMergesReporter::new(resolver);
        reporter.report_changes_with_headlines(RenderState::default(), &changes, &options);
        let report = reporter.content();

        if !self.in_changelog {
            print!("{}", report);
            return Ok(());
        }

        self.write_into_changelog(cli, &config, &cwd, &report)
    }

    /// Flags win when any grouping flag is given; otherwise the config decides
    fn report_options(&self, config: &Config) -> ReportOptions {
        let mut options = ReportOptions::from(&config.report);
        if self.in_categories || self.in_packages || self.in_tags {
            options.with_categories = self.in_categories;
            options.with_packages = self.in_packages;
            options.with_tags = self.in_tags;
        }
        if let Some(priority) = self.priority {
            options.priority = priority;
        }
        options
    }

    fn write_into_changelog(
        &self,
        cli: &Cli,
        config: &Config,
        cwd: &Path,
        report: &str,
    ) -> anyhow::Result<()> {
        let path = cwd.join(&config.changelog.file);
        if !path.exists() {
            return Err(ChangelogError::FileNotFound(path).into());
        }

        let document = std::fs::read_to_string(&path)?;
        let updated = insert_after_marker(&document, &config.changelog.marker, report).ok_or_else(
            || ChangelogError::MarkerNotFound {
                marker: config.changelog.marker.clone(),
                path: path.clone(),
            },
        )?;

        if self.dry_run {
            print!("{}", updated);
            return Ok(());
        }

        std::fs::write(&path, &updated)
            .map_err(|e| ChangelogError::WriteFailed(format!("{}: {}", path.display(), e)))?;

        match cli.format {
            OutputFormat::Json => {
                let summary = serde_json::json!({
                    "file": path.display().to_string(),
                    "inserted_lines": report.lines().count(),
                });
                output::json(&summary)?;
            }
            OutputFormat::Text if !cli.quiet => {
                output::success(&format!(
                    "Report inserted into {}",
                    output::path(&path)
                ));
            }
            OutputFormat::Text => {}
        }

        Ok(())
    }
}

/// Changes for every pull request merged into HEAD, newest first, tagged
/// with the first release that contains them
fn merged_changes(
    repo: &GitRepo,
    factory: &ChangeFactory,
    since_tag: Option<&str>,
) -> anyhow::Result<Vec<Change>> {
    let commits = match since_tag {
        Some(tag) => repo.commits_since_tag(tag)?,
        None => repo.all_commits()?,
    };
    let tags = repo.tags()?;

    let mut changes = Vec::new();
    for commit in &commits {
        let tag = match repo.tag_containing(&commit.hash, &tags) {
            Ok(tag) => tag.map(|t| t.name.as_str()),
            Err(e) => {
                warn!(hash = %commit.short_hash, error = %e, "could not resolve tag for commit");
                None
            }
        };

        if let Some(change) = factory.from_merge_commit(commit, tag) {
            changes.push(change);
        }
    }

    debug!(commits = commits.len(), changes = changes.len(), "collected merged pull requests");
    Ok(changes)
}

/// Insert the report on the lines after the marker, `None` without a marker
fn insert_after_marker(document: &str, marker: &str, report: &str) -> Option<String> {
    let start = document.find(marker)?;
    let line_end = document[start..]
        .find('\n')
        .map_or(document.len(), |i| start + i + 1);

    let (head, tail) = document.split_at(line_end);
    let mut updated = String::with_capacity(document.len() + report.len() + 2);
    updated.push_str(head);
    if !head.ends_with('\n') {
        updated.push('\n');
    }
    updated.push('\n');
    updated.push_str(report);
    if !tail.is_empty() && !tail.starts_with('\n') {
        updated.push('\n');
    }
    updated.push_str(tail);
    Some(updated)
}
