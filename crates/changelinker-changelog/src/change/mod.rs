//! Change records and how they are built

mod category;
mod factory;
mod package;

pub use category::CategoryResolver;
pub use factory::ChangeFactory;
pub use package::{PackageResolver, PackageToken};

use serde::Serialize;

/// One changelog entry with optional tag, category and package
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Change {
    message: String,
    message_without_package: String,
    tag: Option<String>,
    category: Option<String>,
    package: Option<String>,
}

impl Change {
    /// Create a change; the package token is stripped from a copy of the
    /// message once, here
    pub fn new(
        message: impl Into<String>,
        tag: Option<String>,
        category: Option<String>,
        package: Option<String>,
    ) -> Self {
        let message = message.into();
        let message_without_package = match &package {
            Some(package) => strip_package_token(&message, package),
            None => message.clone(),
        };

        Self {
            message,
            message_without_package,
            tag,
            category,
            package,
        }
    }

    /// The entry line as parsed
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The entry line without its `[Package]` token
    pub fn message_without_package(&self) -> &str {
        &self.message_without_package
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn package(&self) -> Option<&str> {
        self.package.as_deref()
    }
}

fn strip_package_token(message: &str, package: &str) -> String {
    let token = format!("[{}]", package);
    match message.find(&token) {
        Some(start) => {
            let mut end = start + token.len();
            // swallow one separating space so no double space is left behind
            if message[end..].starts_with(' ') {
                end += 1;
            }
            format!("{}{}", &message[..start], &message[end..])
        }
        None => message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_without_package() {
        let change = Change::new(
            "- [#12] [CodingStandard] Add rule",
            Some("v1.0.0".to_string()),
            Some("Added".to_string()),
            Some("CodingStandard".to_string()),
        );

        assert_eq!(change.message(), "- [#12] [CodingStandard] Add rule");
        assert_eq!(change.message_without_package(), "- [#12] Add rule");
    }

    #[test]
    fn test_without_package_keeps_message() {
        let change = Change::new("- [#12] Add rule", None, None, None);
        assert_eq!(change.message_without_package(), "- [#12] Add rule");
        assert!(change.tag().is_none());
        assert!(change.package().is_none());
    }
}
