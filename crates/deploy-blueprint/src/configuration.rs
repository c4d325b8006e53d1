//! Blueprint registry and variant materialization
//!
//! Templates are collected from three places in the settings tree:
//!
//! - `blueprint` → scope `default`
//! - `dockerHosts.<name>.blueprint` → scope `docker:<name>`
//! - `hosts.<name>.blueprint` → scope `host:<name>`
//!
//! The top-level `blueprints` list then names a template and the variant
//! identifiers to expand it for:
//!
//! ```yaml
//! blueprints:
//!   - configName: web
//!     variants:
//!       - feature/checkout
//!       - develop
//! ```

use std::sync::Arc;

use deploy_tree::Node;
use deploy_validation::{ValidationErrors, ValidationService};
use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::project::ProjectSettings;
use crate::template::BlueprintTemplate;

/// Scope key of the project-wide template.
pub const DEFAULT_SCOPE: &str = "default";

/// Receives every configuration produced by variant expansion.
pub trait ConfigRegistrar {
    /// Register the expansion of `identifier` for the blueprint entry `config_name`.
    fn register(&mut self, config_name: &str, identifier: &str, config: Node) -> Result<()>;
}

impl ConfigRegistrar for Vec<Node> {
    fn register(&mut self, _config_name: &str, _identifier: &str, config: Node) -> Result<()> {
        self.push(config);
        Ok(())
    }
}

/// All blueprint templates declared by a project.
#[derive(Debug, Clone)]
pub struct BlueprintConfiguration {
    project: Arc<ProjectSettings>,
    templates: IndexMap<String, BlueprintTemplate>,
    blueprints: Option<Node>,
}

impl BlueprintConfiguration {
    /// An empty registry.
    pub fn new(project: Arc<ProjectSettings>) -> Self {
        Self {
            project,
            templates: IndexMap::new(),
            blueprints: None,
        }
    }

    /// Collect templates and the raw `blueprints` list from the settings tree.
    pub fn from_settings(settings: &Node, project: Arc<ProjectSettings>) -> Self {
        let mut configuration = Self::new(project);

        if let Some(template) = settings.get("blueprint") {
            configuration.add_template(DEFAULT_SCOPE, template.clone());
        }

        for (section, scope) in [("dockerHosts", "docker"), ("hosts", "host")] {
            let Some(configs) = settings.get(section) else {
                continue;
            };
            for (name, config) in configs.children() {
                if let Some(template) = config.get("blueprint") {
                    configuration.add_template(format!("{scope}:{name}"), template.clone());
                }
            }
        }

        configuration.blueprints = settings.get("blueprints").cloned();
        configuration
    }

    /// Register (or replace) the template for `scope`.
    pub fn add_template(&mut self, scope: impl Into<String>, template: Node) {
        let scope = scope.into();
        tracing::debug!(scope = %scope, "Registering blueprint template");
        self.templates
            .insert(scope, BlueprintTemplate::new(template, Arc::clone(&self.project)));
    }

    /// Registered scope keys, in declaration order.
    pub fn scopes(&self) -> Vec<&str> {
        self.templates.keys().map(String::as_str).collect()
    }

    pub fn project(&self) -> &ProjectSettings {
        &self.project
    }

    /// The raw `blueprints` setting, if any.
    pub fn blueprints(&self) -> Option<&Node> {
        self.blueprints.as_ref()
    }

    /// Most specific template for `key`: `host:<key>`, then `docker:<key>`, then `default`.
    pub fn get_template(&self, key: &str) -> Result<&BlueprintTemplate> {
        [format!("host:{key}"), format!("docker:{key}"), DEFAULT_SCOPE.to_string()]
            .iter()
            .find_map(|scope| self.templates.get(scope))
            .ok_or_else(|| Error::TemplateNotFound {
                key: key.to_string(),
            })
    }

    /// Variant identifiers listed for `config_name` in the `blueprints` setting.
    ///
    /// `None` means no entry matches, which is a normal state.
    pub fn get_variants(&self, config_name: &str) -> Option<Vec<String>> {
        self.blueprints
            .as_ref()?
            .children()
            .into_iter()
            .map(|(_, entry)| entry)
            .find(|entry| {
                entry
                    .get("configName")
                    .and_then(Node::as_scalar)
                    .is_some_and(|name| name.to_text() == config_name)
            })
            .and_then(|entry| entry.get("variants"))
            .map(identifiers)
    }

    /// Expand the stored `blueprints` setting. Returns the number of registered configs.
    pub fn expand_all(&self, registrar: &mut dyn ConfigRegistrar) -> Result<usize> {
        match &self.blueprints {
            Some(entries) => self.expand_variants(entries, registrar),
            None => Ok(0),
        }
    }

    /// Validate `entries`, then expand and register every listed variant in order.
    ///
    /// Every malformed entry is reported together before anything is expanded.
    pub fn expand_variants(
        &self,
        entries: &Node,
        registrar: &mut dyn ConfigRegistrar,
    ) -> Result<usize> {
        validate_entries(entries)?;

        let mut registered = 0;
        for (_, entry) in entries.children() {
            let config_name = entry
                .get("configName")
                .and_then(Node::as_scalar)
                .map(|name| name.to_text())
                .unwrap_or_default();
            let template = self.get_template(&config_name)?;

            for identifier in entry.get("variants").map(identifiers).unwrap_or_default() {
                tracing::debug!(config_name = %config_name, identifier = %identifier, "Expanding blueprint variant");
                registrar.register(&config_name, &identifier, template.expand(&identifier))?;
                registered += 1;
            }
        }
        Ok(registered)
    }
}

fn validate_entries(entries: &Node) -> Result<()> {
    let mut errors = ValidationErrors::new();

    if !entries.is_array() {
        errors.add_error("blueprints", "`blueprints` must be a list of entries");
    }
    for (idx, entry) in entries.children() {
        let mut service = ValidationService::new(entry, &mut errors, format!("blueprints[{idx}]"));
        service.has_key("configName", "the name of the template to expand");
        service.is_array("variants", "the list of identifiers to expand");
    }

    errors.into_result()?;
    Ok(())
}

fn identifiers(variants: &Node) -> Vec<String> {
    variants
        .children()
        .into_iter()
        .filter_map(|(_, variant)| variant.as_scalar().map(|scalar| scalar.to_text()))
        .collect()
}
