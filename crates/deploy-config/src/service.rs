//! The configuration service
//!
//! Loads one base document plus any number of override layers, then resolves
//! the merged settings into concrete host and docker-host configurations:
//!
//! 1. protected properties are read from the base document's
//!    `protectedProperties` setting and guard every override merge
//! 2. blueprint variants are expanded and registered as hosts
//! 3. `inheritsFrom` chains are resolved
//! 4. hosts are normalized and validated as one batch

use std::sync::Arc;

use deploy_blueprint::{BlueprintConfiguration, ConfigRegistrar, ProjectSettings, slugify};
use deploy_tree::{MergeOptions, Node, NodeValue, Scalar, SourceRegistry};
use deploy_validation::ValidationErrors;
use indexmap::IndexMap;
use serde_json::Value;

use crate::document::Document;
use crate::error::{Error, Result};
use crate::host;
use crate::inheritance::resolve_inheritance;

/// Setting listing the dotted paths local overrides may not change.
pub const PROTECTED_PROPERTIES_KEY: &str = "protectedProperties";

/// Section holding host configurations.
pub const HOSTS_KEY: &str = "hosts";

/// Section holding docker-host configurations.
pub const DOCKER_HOSTS_KEY: &str = "dockerHosts";

/// Loaded and resolved configuration of one project.
#[derive(Debug)]
pub struct ConfigurationService {
    sources: SourceRegistry,
    options: MergeOptions,
    settings: Node,
    project: Arc<ProjectSettings>,
    blueprints: BlueprintConfiguration,
    hosts: IndexMap<String, Node>,
    docker_hosts: IndexMap<String, Node>,
    warnings: ValidationErrors,
}

impl Default for ConfigurationService {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigurationService {
    /// An empty service with no settings and no hosts.
    pub fn new() -> Self {
        let mut sources = SourceRegistry::new();
        let project = Arc::new(ProjectSettings::default());
        Self {
            settings: Node::mapping(&sources.intern("<empty>")),
            sources,
            options: MergeOptions::new(),
            blueprints: BlueprintConfiguration::new(Arc::clone(&project)),
            project,
            hosts: IndexMap::new(),
            docker_hosts: IndexMap::new(),
            warnings: ValidationErrors::new(),
        }
    }

    /// Build a service from a base document and override layers, applied in order.
    pub fn from_documents(base: &Document, overrides: &[Document]) -> Result<Self> {
        let mut service = Self::new();
        service.load(base, overrides)?;
        Ok(service)
    }

    /// Replace the current configuration with `base` plus `overrides`, then resolve it.
    ///
    /// On error the service keeps its previous state.
    pub fn load(&mut self, base: &Document, overrides: &[Document]) -> Result<()> {
        let mut settings = base.parse(&mut self.sources)?;

        let mut options = MergeOptions::new();
        options
            .protected_mut()
            .configure(&settings, PROTECTED_PROPERTIES_KEY);

        for layer in overrides {
            tracing::debug!(origin = %layer.origin, "Merging override layer");
            let overrides = layer.parse(&mut self.sources)?;
            settings.merge(&overrides, &options);
        }

        let resolved = Resolved::build(&settings, &options)?;
        self.settings = settings;
        self.options = options;
        self.commit(resolved);
        Ok(())
    }

    /// Recompute hosts, docker hosts and blueprints from the current settings.
    ///
    /// On error the service keeps its previous state.
    pub fn resolve(&mut self) -> Result<()> {
        let resolved = Resolved::build(&self.settings, &self.options)?;
        self.commit(resolved);
        Ok(())
    }

    fn commit(&mut self, resolved: Resolved) {
        for message in resolved.warnings.warnings().values() {
            tracing::warn!("{}", message);
        }
        self.project = resolved.project;
        self.blueprints = resolved.blueprints;
        self.hosts = resolved.hosts;
        self.docker_hosts = resolved.docker_hosts;
        self.warnings = resolved.warnings;
    }

    /// The merged settings tree.
    pub fn settings(&self) -> &Node {
        &self.settings
    }

    /// Native value of a setting at a dotted path.
    pub fn setting(&self, path: &str) -> Option<Value> {
        self.settings.get_property(path)
    }

    pub fn project(&self) -> &ProjectSettings {
        &self.project
    }

    pub fn blueprints(&self) -> &BlueprintConfiguration {
        &self.blueprints
    }

    pub fn options(&self) -> &MergeOptions {
        &self.options
    }

    /// Warnings of the last successful resolve, keyed by setting.
    pub fn warnings(&self) -> &ValidationErrors {
        &self.warnings
    }

    pub fn host(&self, name: &str) -> Result<&Node> {
        self.hosts.get(name).ok_or_else(|| Error::HostNotFound {
            name: name.to_string(),
        })
    }

    pub fn host_names(&self) -> Vec<&str> {
        self.hosts.keys().map(String::as_str).collect()
    }

    pub fn hosts(&self) -> &IndexMap<String, Node> {
        &self.hosts
    }

    pub fn docker_host(&self, name: &str) -> Result<&Node> {
        self.docker_hosts
            .get(name)
            .ok_or_else(|| Error::DockerHostNotFound {
                name: name.to_string(),
            })
    }

    pub fn docker_host_names(&self) -> Vec<&str> {
        self.docker_hosts.keys().map(String::as_str).collect()
    }
}

/// Everything derived from one settings tree.
struct Resolved {
    project: Arc<ProjectSettings>,
    blueprints: BlueprintConfiguration,
    hosts: IndexMap<String, Node>,
    docker_hosts: IndexMap<String, Node>,
    warnings: ValidationErrors,
}

impl Resolved {
    fn build(settings: &Node, options: &MergeOptions) -> Result<Self> {
        let project = Arc::new(ProjectSettings::from_settings(settings));
        let blueprints = BlueprintConfiguration::from_settings(settings, Arc::clone(&project));

        let mut hosts = collect_section(settings, HOSTS_KEY);
        let mut registrar = HostRegistrar {
            hosts: &mut hosts,
            options,
        };
        let expanded = blueprints.expand_all(&mut registrar)?;
        tracing::debug!(expanded, "Registered blueprint variants");

        let hosts = resolve_inheritance(&hosts, options)?;
        let docker_hosts = resolve_inheritance(&collect_section(settings, DOCKER_HOSTS_KEY), options)?;

        let mut errors = ValidationErrors::new();
        let hosts = finish(hosts, &mut errors, "host", host::validate_host)?;
        let docker_hosts = finish(docker_hosts, &mut errors, "docker host", host::validate_docker_host)?;

        Ok(Self {
            project,
            blueprints,
            hosts,
            docker_hosts,
            warnings: errors.into_result()?,
        })
    }
}

/// Adds expanded blueprint variants to the host list.
///
/// A host declared explicitly under the same name keeps its own values and
/// only takes missing ones from the expansion.
struct HostRegistrar<'a> {
    hosts: &'a mut IndexMap<String, Node>,
    options: &'a MergeOptions,
}

impl ConfigRegistrar for HostRegistrar<'_> {
    fn register(
        &mut self,
        config_name: &str,
        identifier: &str,
        config: Node,
    ) -> deploy_blueprint::Result<()> {
        let name = config
            .get("configName")
            .and_then(Node::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}-{}", config_name, slugify(identifier, "-")));

        match self.hosts.get_mut(&name) {
            Some(existing) => existing.base_on_top(&config, self.options),
            None => {
                self.hosts.insert(name, config);
            }
        }
        Ok(())
    }
}

/// Children of `section`, without their `blueprint` templates.
///
/// A config holding nothing but a blueprint is a pure template and is dropped.
fn collect_section(settings: &Node, section: &str) -> IndexMap<String, Node> {
    let Some(configs) = settings.get(section) else {
        return IndexMap::new();
    };
    let mut collected = IndexMap::new();
    for (name, config) in configs.children() {
        let mut config = match config.value() {
            NodeValue::Scalar(Scalar::Null) => Node::mapping(config.source()),
            _ => config.clone(),
        };
        if config.unset("blueprint").is_some() && config.is_empty() {
            tracing::debug!(name = %name, "Skipping template-only configuration");
            continue;
        }
        collected.insert(name, config);
    }
    collected
}

fn finish(
    configs: IndexMap<String, Node>,
    errors: &mut ValidationErrors,
    kind: &str,
    validate: fn(&str, &Node, &mut ValidationErrors),
) -> Result<IndexMap<String, Node>> {
    let mut finished = IndexMap::with_capacity(configs.len());
    for (name, mut config) in configs {
        if !config.is_assoc_array() {
            errors.add_error(name.clone(), format!("{kind} `{name}` must be a mapping"));
            continue;
        }
        host::normalize(&name, &mut config)?;
        validate(&name, &config, errors);
        finished.insert(name, config);
    }
    Ok(finished)
}
