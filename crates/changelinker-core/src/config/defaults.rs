//! Default configuration values

use super::types::Config;

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "changelinker.yaml";

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "changelinker.toml";

/// Alternative configuration file name
pub const ALT_CONFIG_FILE: &str = ".changelinker.yaml";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_YAML,
        DEFAULT_CONFIG_TOML,
        ALT_CONFIG_FILE,
        ".changelinker.toml",
    ]
}

/// Generate default configuration YAML
pub fn default_config_yaml() -> String {
    let config = Config::default();
    serde_yaml::to_string(&config).unwrap_or_else(|_| DEFAULT_CONFIG_TEMPLATE.to_string())
}

/// Generate default configuration TOML
pub fn default_config_toml() -> String {
    toml::to_string_pretty(&Config::default()).unwrap_or_default()
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# changelinker configuration

# Resolved from the `origin` remote when left empty
# repository_url: https://github.com/owner/repo

changelog:
  file: CHANGELOG.md
  marker: "<!-- changelog-linker -->"

report:
  in_categories: true
  in_packages: false
  in_tags: true
  priority: none
  unreleased_label: Unreleased

git:
  remote: origin

authors_to_ignore: []

names_to_urls: {}

package_aliases: {}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_parses() {
        let config: Config = serde_yaml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert!(config.repository_url.is_none());
        assert_eq!(config.report.unreleased_label, "Unreleased");
    }

    #[test]
    fn test_default_toml_parses_back() {
        let rendered = default_config_toml();
        let config: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(config.git.remote, "origin");
    }
}
