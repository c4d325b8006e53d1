//! End-to-end tests for the configuration pipeline
//!
//! Exercises the complete flow on disk: layered loading -> protected merge ->
//! blueprint expansion -> inheritance -> validation.

use deploy_config::{ConfigLoader, Error};
use deploy_test_utils::TestProject;
use deploy_tree::{MergeOptions, ProtectedProperties};
use pretty_assertions::assert_eq;
use serde_json::json;

const FABFILE: &str = r#"
name: MyShop
protectedProperties:
  - hosts.base.database.password
hosts:
  base:
    type: dev
    needs: [ssh, git, mysql]
    user: deploy
    database:
      user: shop
      password: s3cret
  feature:
    blueprint:
      configName: "feature-%slug.with-hyphens.without-feature%"
      inheritsFrom: base
      branch: "%identifier%"
      host: "%project-key%-%slug.with-hyphens.without-feature%.example.com"
      rootFolder: "/var/www/%slug.with-hyphens%"
      database:
        name: "%project-slug%_%slug%"
blueprints:
  - configName: feature
    variants:
      - feature/New-Checkout
      - feature/search
"#;

fn loader(project: &TestProject) -> ConfigLoader {
    ConfigLoader::with_global_config_dir(project.root(), project.global_dir())
}

#[test]
fn full_pipeline_resolves_expanded_hosts() {
    let project = TestProject::new()
        .fabfile(FABFILE)
        .user_overrides("hosts:\n  base:\n    user: alice\n")
        .local_overrides("hosts:\n  base:\n    database:\n      password: changed\n      host: 127.0.0.1\n");

    let service = loader(&project).load().unwrap();

    assert_eq!(
        service.host_names(),
        vec!["base", "feature-new-checkout", "feature-search"]
    );
    assert_eq!(
        service.host("feature-new-checkout").unwrap().to_value(),
        json!({
            "configName": "feature-new-checkout",
            "branch": "feature/New-Checkout",
            "host": "mys-new-checkout.example.com",
            "rootFolder": "/var/www/feature-new-checkout",
            "database": {
                "name": "myshop_featurenewcheckout",
                "user": "shop",
                "password": "s3cret",
                "host": "127.0.0.1",
            },
            "type": "dev",
            "needs": ["ssh", "git", "mysql"],
            "user": "alice",
        })
    );
    assert!(!service.warnings().has_warnings());
}

#[test]
fn invalid_layers_are_reported_as_one_batch() {
    let project = TestProject::new()
        .fabfile(FABFILE)
        .local_overrides("hosts:\n  base:\n    type: qa\n    rootFolder: /srv/\n");

    let err = loader(&project).load().unwrap_err();
    let bag = match err {
        Error::Validation(deploy_validation::Error::ValidationFailed(bag)) => bag,
        other => panic!("expected a validation error, got {other:?}"),
    };

    // both variants inherit the bad type but keep their own rootFolder
    assert_eq!(bag.keys(), ["type", "rootFolder", "type", "type"]);
    assert!(bag.to_string().contains("has invalid value `qa`"));
}

#[test]
fn tree_operations_compose_across_crates() {
    let mut settings = deploy_test_utils::node(json!({
        "protectedProperties": ["db.password"],
        "db": {"password": "p", "user": "u"},
    }));
    let mut protected = ProtectedProperties::new();
    protected.configure(&settings, "protectedProperties");
    let options = MergeOptions::with_protected(protected);

    let local = deploy_test_utils::node_from(
        json!({"db": {"password": "x", "user": "v"}, "extra": true}),
        "fabfile.local.yaml",
    );
    settings.merge(&local, &options);

    assert_eq!(settings.get_property("db.password"), Some(json!("p")));
    assert_eq!(settings.get_property("db.user"), Some(json!("v")));
    assert_eq!(
        settings.find("extra").unwrap().source().as_str(),
        "fabfile.local.yaml"
    );
}
