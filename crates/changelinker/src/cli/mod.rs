//! CLI definition and command handling

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};

use commands::{CompletionsCommand, DumpMergesCommand, InitCommand, LinkCommand};

/// Changelinker - Grouped, cross-referenced changelogs from merge commits
#[derive(Debug, Parser)]
#[command(name = "changelinker")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a changelinker configuration file
    Init(InitCommand),

    /// Turn references in a changelog into links
    Link(LinkCommand),

    /// Render merged pull requests as grouped changelog sections
    DumpMerges(DumpMergesCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> anyhow::Result<()> {
        // Change to specified directory if provided
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        match self.command {
            Commands::Init(ref cmd) => cmd.execute(&self),
            Commands::Link(ref cmd) => cmd.execute(&self),
            Commands::DumpMerges(ref cmd) => cmd.execute(&self),
            Commands::Completions(ref cmd) => cmd.execute(&self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_dump_merges() {
        let cli = Cli::try_parse_from([
            "changelinker",
            "-v",
            "dump-merges",
            "--in-packages",
            "--priority",
            "packages",
            "--since-tag",
            "v1.0.0",
        ])
        .unwrap();

        assert!(cli.verbose);
        let Commands::DumpMerges(cmd) = cli.command else {
            panic!("expected dump-merges");
        };
        assert!(cmd.in_packages);
        assert_eq!(cmd.since_tag.as_deref(), Some("v1.0.0"));
    }

    #[test]
    fn test_parse_link_with_format() {
        let cli = Cli::try_parse_from([
            "changelinker",
            "link",
            "docs/CHANGELOG.md",
            "--dry-run",
            "--format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        let Commands::Link(cmd) = cli.command else {
            panic!("expected link");
        };
        assert!(cmd.dry_run);
        assert_eq!(cmd.file.as_deref(), Some(std::path::Path::new("docs/CHANGELOG.md")));
    }
}
