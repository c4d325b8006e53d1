//! A single parametrized blueprint

use std::sync::Arc;

use deploy_tree::{Node, Replacements};

use crate::project::ProjectSettings;
use crate::slug::{DEFAULT_SEPARATOR, HYPHEN_SEPARATOR, slugify, without_feature};

/// A configuration template expanded once per variant identifier.
///
/// Expansion substitutes these placeholders in every string leaf:
///
/// | placeholder | value |
/// |---|---|
/// | `%identifier%` | the identifier |
/// | `%slug%`, `%slug.with-hyphens%` | the identifier, slugified |
/// | `%slug.without-feature%`, `%slug.with-hyphens.without-feature%` | same, after stripping `feature/` |
/// | `%project-identifier%` | the project name |
/// | `%project-slug%`, `%project-slug.with-hyphens%` | the project name, slugified |
/// | `%project-key%` | the project key, slugified without separator |
#[derive(Debug, Clone)]
pub struct BlueprintTemplate {
    template: Node,
    project: Arc<ProjectSettings>,
}

impl BlueprintTemplate {
    pub fn new(template: Node, project: Arc<ProjectSettings>) -> Self {
        Self { template, project }
    }

    pub fn template(&self) -> &Node {
        &self.template
    }

    pub fn project(&self) -> &ProjectSettings {
        &self.project
    }

    /// The substitution table for `identifier`.
    pub fn replacements(&self, identifier: &str) -> Replacements {
        let stripped = without_feature(identifier);
        let name = &self.project.name;

        let mut table = Replacements::new();
        table.insert("%identifier%", identifier);
        table.insert("%slug%", slugify(identifier, DEFAULT_SEPARATOR));
        table.insert("%slug.with-hyphens%", slugify(identifier, HYPHEN_SEPARATOR));
        table.insert("%slug.without-feature%", slugify(stripped, DEFAULT_SEPARATOR));
        table.insert(
            "%slug.with-hyphens.without-feature%",
            slugify(stripped, HYPHEN_SEPARATOR),
        );
        table.insert("%project-identifier%", name.as_str());
        table.insert("%project-slug%", slugify(name, DEFAULT_SEPARATOR));
        table.insert("%project-slug.with-hyphens%", slugify(name, HYPHEN_SEPARATOR));
        table.insert("%project-key%", slugify(&self.project.effective_key(), ""));
        table
    }

    /// Produce the concrete configuration for `identifier`.
    ///
    /// The template itself is never modified.
    pub fn expand(&self, identifier: &str) -> Node {
        let mut expanded = self.template.clone();
        expanded.expand_replacements(&self.replacements(identifier), &[]);
        expanded
    }
}
