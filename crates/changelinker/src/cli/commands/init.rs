//! Init command

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use changelinker_core::config::defaults::{
    default_config_toml, DEFAULT_CONFIG_TEMPLATE, DEFAULT_CONFIG_TOML, DEFAULT_CONFIG_YAML,
};
use changelinker_core::config::find_config;

use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

/// Create a changelinker configuration file
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Write TOML instead of YAML
    #[arg(long)]
    pub toml: bool,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, toml = self.toml, "executing init command");
        let cwd = std::env::current_dir()?;
        let default_name = if self.toml {
            DEFAULT_CONFIG_TOML
        } else {
            DEFAULT_CONFIG_YAML
        };
        let config_path = self.output.clone().unwrap_or_else(|| cwd.join(default_name));

        if config_path.exists() && !self.force {
            anyhow::bail!(
                "Configuration file already exists at {}. Use --force to overwrite.",
                config_path.display()
            );
        }
        if let Some(existing) = find_config(&cwd).filter(|p| *p != config_path) {
            if !cli.quiet {
                output::warning(&format!(
                    "{} already configures this directory and will take precedence",
                    existing.display()
                ));
            }
        }

        let content = if self.toml {
            default_config_toml()
        } else {
            DEFAULT_CONFIG_TEMPLATE.to_string()
        };
        std::fs::write(&config_path, &content)?;

        match cli.format {
            OutputFormat::Json => {
                let summary = serde_json::json!({ "config": config_path.display().to_string() });
                output::json(&summary)?;
            }
            OutputFormat::Text if !cli.quiet => {
                output::success(&format!(
                    "Created configuration at {}",
                    output::path(&config_path)
                ));
                println!();
                println!("Next steps:");
                println!("  1. Set repository_url in {} or add an origin remote", config_path.display());
                println!("  2. Run {} to list merged pull requests", style("changelinker dump-merges").cyan());
                println!("  3. Run {} to link references in your changelog", style("changelinker link").cyan());
            }
            OutputFormat::Text => {}
        }

        Ok(())
    }
}
