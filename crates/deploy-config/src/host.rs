//! Host and docker-host normalization and validation

use deploy_tree::{Node, Scalar};
use deploy_validation::{ValidationErrors, ValidationService};

use crate::error::Result;

/// Accepted values of a host's `type`.
pub const HOST_TYPES: &[&str] = &["dev", "stage", "prod", "test"];

/// Keys that still work but should be migrated away from.
pub const DEPRECATED_HOST_KEYS: &[(&str, &str)] = &[
    ("runLocally", "use `needs: [local]` instead"),
    ("useShell", "shell usage is configured per method"),
];

/// Bring a resolved host into canonical shape.
///
/// - `configName` is set to the key the host is registered under
/// - a scalar `needs` becomes a one-element list
pub fn normalize(name: &str, config: &mut Node) -> Result<()> {
    let source = config.source().clone();
    config.set("configName", Node::scalar(Scalar::from(name), &source))?;
    if let Some(needs) = config.get_mut("needs") {
        needs.transform_to_array();
    }
    Ok(())
}

/// Record every problem with host `name` into `errors`.
pub fn validate_host(name: &str, config: &Node, errors: &mut ValidationErrors) {
    let mut service = ValidationService::new(config, errors, format!("host `{name}`"));
    service.is_one_of("type", HOST_TYPES);
    if config.has("needs") {
        service.is_array("needs", "the list of methods this host needs");
    }
    service.check_for_valid_folder_name("rootFolder");
    service.deprecate(DEPRECATED_HOST_KEYS.iter().copied());
}

/// Record every problem with docker host `name` into `errors`.
pub fn validate_docker_host(name: &str, config: &Node, errors: &mut ValidationErrors) {
    let mut service = ValidationService::new(config, errors, format!("docker host `{name}`"));
    service.check_for_valid_folder_name("rootFolder");
    if config.has("tasks") {
        service.is_array("tasks", "a mapping of task name to commands");
    }
}
