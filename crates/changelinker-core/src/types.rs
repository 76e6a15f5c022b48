//! Core types for changelinker

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Which grouping dimension takes precedence when ordering changes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortPriority {
    /// Keep the input order, group by tag only
    #[default]
    None,
    /// Packages outermost, categories inside
    Packages,
    /// Categories outermost, packages inside
    Categories,
}

impl SortPriority {
    /// Returns the string representation of the priority
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Packages => "packages",
            Self::Categories => "categories",
        }
    }
}

impl std::fmt::Display for SortPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SortPriority {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" | "" => Ok(Self::None),
            "packages" | "package" => Ok(Self::Packages),
            "categories" | "category" => Ok(Self::Categories),
            _ => Err(ConfigError::InvalidValue {
                field: "priority".to_string(),
                message: format!("unknown priority '{}', expected none, packages or categories", s),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_from_str() {
        assert_eq!("packages".parse::<SortPriority>().unwrap(), SortPriority::Packages);
        assert_eq!("Categories".parse::<SortPriority>().unwrap(), SortPriority::Categories);
        assert_eq!("none".parse::<SortPriority>().unwrap(), SortPriority::None);
        assert!("alphabetical".parse::<SortPriority>().is_err());
    }

    #[test]
    fn test_priority_display_round_trips() {
        for priority in [SortPriority::None, SortPriority::Packages, SortPriority::Categories] {
            assert_eq!(priority.to_string().parse::<SortPriority>().unwrap(), priority);
        }
    }

    #[test]
    fn test_unknown_priority_rejected_by_serde() {
        let parsed: Result<SortPriority, _> = serde_yaml::from_str("tags");
        assert!(parsed.is_err());
    }
}
