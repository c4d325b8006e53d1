//! Project-wide settings used during blueprint expansion

use deploy_tree::Node;

/// Number of characters of the project name used when no key is configured.
const DEFAULT_KEY_LENGTH: usize = 3;

/// The `name` and optional short `key` of the project owning a fabfile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectSettings {
    pub name: String,
    pub key: Option<String>,
}

impl ProjectSettings {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: None,
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Read `name` and `key` from the top level of the settings tree.
    pub fn from_settings(settings: &Node) -> Self {
        let text = |key: &str| {
            settings
                .get(key)
                .and_then(Node::as_scalar)
                .map(|scalar| scalar.to_text())
        };
        Self {
            name: text("name").unwrap_or_default(),
            key: text("key").filter(|key| !key.is_empty()),
        }
    }

    /// The configured key, or the first characters of the name.
    pub fn effective_key(&self) -> String {
        match &self.key {
            Some(key) => key.clone(),
            None => self.name.chars().take(DEFAULT_KEY_LENGTH).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deploy_tree::Source;
    use serde_json::json;

    #[test]
    fn test_effective_key_defaults_to_name_prefix() {
        assert_eq!(ProjectSettings::new("MyShop").effective_key(), "MyS");
        assert_eq!(ProjectSettings::new("ab").effective_key(), "ab");
        assert_eq!(
            ProjectSettings::new("MyShop").with_key("shp").effective_key(),
            "shp"
        );
    }

    #[test]
    fn test_from_settings() {
        let settings = Node::new(json!({"name": "MyShop", "key": ""}), &Source::new("f"));
        let project = ProjectSettings::from_settings(&settings);
        assert_eq!(project, ProjectSettings::new("MyShop"));
    }
}
