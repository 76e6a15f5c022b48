//! Configuration validation

use tracing::debug;
use url::Url;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_repository_url(config)?;
    validate_changelog(config)?;
    validate_names_to_urls(config)?;
    validate_package_aliases(config)?;
    debug!("configuration validation passed");
    Ok(())
}

/// Check that a string is an absolute http(s) URL
pub fn validate_http_url(field: &str, value: &str) -> Result<()> {
    let parsed = Url::parse(value).map_err(|e| ConfigError::InvalidValue {
        field: field.to_string(),
        message: format!("'{}' is not a valid URL: {}", value, e),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidValue {
            field: field.to_string(),
            message: format!("must use http or https, got '{}'", parsed.scheme()),
        }
        .into());
    }

    Ok(())
}

fn validate_repository_url(config: &Config) -> Result<()> {
    match config.repository_url.as_deref() {
        Some(url) => validate_http_url("repository_url", url),
        None => Ok(()),
    }
}

fn validate_changelog(config: &Config) -> Result<()> {
    if config.changelog.file.as_os_str().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "changelog.file".to_string(),
            message: "file cannot be empty".to_string(),
        }
        .into());
    }

    if config.changelog.marker.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "changelog.marker".to_string(),
            message: "marker cannot be empty".to_string(),
        }
        .into());
    }

    Ok(())
}

fn validate_names_to_urls(config: &Config) -> Result<()> {
    for (name, url) in &config.names_to_urls {
        if name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "names_to_urls".to_string(),
                message: "name cannot be empty".to_string(),
            }
            .into());
        }
        validate_http_url(&format!("names_to_urls.{}", name), url)?;
    }

    Ok(())
}

fn validate_package_aliases(config: &Config) -> Result<()> {
    if !config.package_aliases.is_empty() {
        debug!(count = config.package_aliases.len(), "validating package aliases");
    }
    for (alias, package) in &config.package_aliases {
        if alias.is_empty() || package.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: format!("package_aliases.{}", alias),
                message: "alias and package name cannot be empty".to_string(),
            }
            .into());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_default_config() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_repository_url() {
        let mut config = Config::default();
        config.repository_url = Some("https://github.com/owner/repo".to_string());
        assert!(validate_config(&config).is_ok());

        config.repository_url = Some("not a url".to_string());
        assert!(validate_config(&config).is_err());

        config.repository_url = Some("ftp://example.com/repo".to_string());
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_names_to_urls() {
        let mut config = Config::default();
        config
            .names_to_urls
            .insert("PHPStan".to_string(), "https://phpstan.org".to_string());
        assert!(validate_config(&config).is_ok());

        config
            .names_to_urls
            .insert("Broken".to_string(), "nowhere".to_string());
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_empty_marker() {
        let mut config = Config::default();
        config.changelog.marker = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }
}
