//! Tests for the configuration service

use deploy_config::{ConfigurationService, Document, Error};
use rstest::rstest;
use serde_json::json;

fn load(base: &str, overrides: &[&str]) -> deploy_config::Result<ConfigurationService> {
    let base = Document::new("fabfile.yaml", base);
    let overrides: Vec<_> = overrides
        .iter()
        .enumerate()
        .map(|(idx, content)| Document::new(format!("override-{idx}.yaml"), *content))
        .collect();
    ConfigurationService::from_documents(&base, &overrides)
}

fn validation_keys(err: Error) -> Vec<String> {
    match err {
        Error::Validation(deploy_validation::Error::ValidationFailed(bag)) => bag.keys().to_vec(),
        other => panic!("expected a validation error, got {other:?}"),
    }
}

mod layering {
    use super::*;
    use pretty_assertions::assert_eq;

    const BASE: &str = r#"
name: MyShop
protectedProperties:
  - hosts.prod.rootFolder
hosts:
  prod:
    type: prod
    rootFolder: /var/www/shop
    host: shop.example.com
"#;

    #[test]
    fn overrides_change_unprotected_values() {
        let service = load(BASE, &["hosts:\n  prod:\n    host: localhost\n    port: 2222\n"]).unwrap();
        let prod = service.host("prod").unwrap();

        assert_eq!(prod.get_property("host"), Some(json!("localhost")));
        assert_eq!(prod.get_property("port"), Some(json!(2222)));
    }

    #[test]
    fn protected_values_survive_every_layer() {
        let service = load(
            BASE,
            &[
                "hosts:\n  prod:\n    rootFolder: /tmp/user\n",
                "hosts:\n  prod:\n    rootFolder: /tmp/local\n",
            ],
        )
        .unwrap();

        assert_eq!(
            service.setting("hosts.prod.rootFolder"),
            Some(json!("/var/www/shop"))
        );
        assert_eq!(service.options().protected().paths(), ["hosts.prod.rootFolder"]);
    }

    #[test]
    fn override_layers_cannot_add_protection() {
        let service = load(
            "name: MyShop\nsetting: base\n",
            &["protectedProperties: [setting]\n", "setting: local\n"],
        )
        .unwrap();
        assert_eq!(service.setting("setting"), Some(json!("local")));
    }

    #[test]
    fn values_remember_their_document() {
        let service = load(BASE, &["hosts:\n  prod:\n    port: 2222\n"]).unwrap();
        let prod = service.host("prod").unwrap();

        assert_eq!(prod.find("host").unwrap().source().as_str(), "fabfile.yaml");
        assert_eq!(prod.find("port").unwrap().source().as_str(), "override-0.yaml");
    }

    #[test]
    fn reload_resets_protection() {
        let mut service = load(BASE, &[]).unwrap();
        service
            .load(&Document::new("other.yaml", "name: Other\n"), &[])
            .unwrap();

        assert!(service.options().protected().is_empty());
        assert!(service.host_names().is_empty());
        assert_eq!(service.project().name, "Other");
    }

    #[test]
    fn failed_reload_keeps_previous_state() {
        let mut service = load(BASE, &[]).unwrap();
        let err = service
            .load(
                &Document::new("broken.yaml", "name: Broken\nhosts:\n  web:\n    type: live\n"),
                &[],
            )
            .unwrap_err();

        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(service.setting("name"), Some(json!("MyShop")));
        assert_eq!(service.project().name, "MyShop");
        assert_eq!(service.host_names(), vec!["prod"]);
        assert_eq!(service.options().protected().paths(), ["hosts.prod.rootFolder"]);
    }
}

mod blueprints {
    use super::*;
    use pretty_assertions::assert_eq;

    const BASE: &str = r#"
name: MyShop
hosts:
  web:
    blueprint:
      configName: "web-%slug.with-hyphens.without-feature%"
      type: dev
      branch: "%identifier%"
      rootFolder: "/var/www/%project-slug%/%slug%"
blueprints:
  - configName: web
    variants:
      - feature/New-Checkout
      - develop
"#;

    #[test]
    fn variants_become_hosts() {
        let service = load(BASE, &[]).unwrap();

        assert_eq!(service.host_names(), vec!["web-new-checkout", "web-develop"]);
        assert_eq!(
            service.host("web-new-checkout").unwrap().to_value(),
            json!({
                "configName": "web-new-checkout",
                "type": "dev",
                "branch": "feature/New-Checkout",
                "rootFolder": "/var/www/myshop/featurenewcheckout",
            })
        );
        assert_eq!(service.blueprints().scopes(), vec!["host:web"]);
    }

    #[test]
    fn explicit_host_wins_over_expansion() {
        let service = load(BASE, &["hosts:\n  web-develop:\n    type: stage\n"]).unwrap();
        let host = service.host("web-develop").unwrap();

        assert_eq!(host.get_property("type"), Some(json!("stage")));
        assert_eq!(host.get_property("branch"), Some(json!("develop")));
    }

    #[test]
    fn unnamed_expansions_are_named_after_entry_and_identifier() {
        let service = load(
            "name: MyShop\nblueprint:\n  type: dev\nblueprints:\n  - configName: api\n    variants: [feature/x]\n",
            &[],
        )
        .unwrap();
        assert_eq!(service.host_names(), vec!["api-feature-x"]);
    }

    #[test]
    fn malformed_blueprints_fail_the_load() {
        let err = load(
            "name: MyShop\nblueprint: {type: dev}\nblueprints:\n  - variants: [a]\n",
            &[],
        )
        .unwrap_err();
        assert!(
            matches!(err, Error::Blueprint(deploy_blueprint::Error::Validation(_))),
            "got {err:?}"
        );
    }
}

mod hosts {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn inheritance_and_normalization() {
        let service = load(
            r#"
name: MyShop
hosts:
  base:
    type: dev
    needs: ssh
    user: deploy
  web:
    inheritsFrom: base
    host: web.example.com
"#,
            &[],
        )
        .unwrap();

        assert_eq!(
            service.host("web").unwrap().to_value(),
            json!({
                "host": "web.example.com",
                "type": "dev",
                "needs": ["ssh"],
                "user": "deploy",
                "configName": "web",
            })
        );
    }

    #[test]
    fn every_invalid_host_is_reported_together() {
        let err = load(
            r#"
name: MyShop
hosts:
  a:
    type: live
  b:
    rootFolder: /srv/
  c: 42
"#,
            &[],
        )
        .unwrap_err();

        assert_eq!(validation_keys(err), ["type", "type", "rootFolder", "c"]);
    }

    #[test]
    fn deprecated_keys_are_warnings_only() {
        let service = load("hosts:\n  local:\n    type: dev\n    runLocally: true\n", &[]).unwrap();

        assert!(service.warnings().has_warnings());
        assert!(!service.warnings().has_errors());
        assert!(service.warnings().warnings().contains_key("runLocally"));
    }

    #[test]
    fn null_host_is_an_empty_mapping() {
        let err = load("hosts:\n  empty: ~\n", &[]).unwrap_err();
        assert_eq!(validation_keys(err), ["type"]);
    }

    #[rstest]
    #[case::host("web", true)]
    #[case::docker_host("mbb", false)]
    fn unknown_names_are_reported(#[case] name: &str, #[case] is_host: bool) {
        let service = load("name: MyShop\n", &[]).unwrap();
        if is_host {
            assert!(matches!(service.host(name), Err(Error::HostNotFound { .. })));
        } else {
            assert!(matches!(
                service.docker_host(name),
                Err(Error::DockerHostNotFound { .. })
            ));
        }
    }

    #[test]
    fn docker_hosts_resolve_inheritance() {
        let service = load(
            r#"
dockerHosts:
  base:
    rootFolder: /
    tasks:
      start: [docker compose up -d]
  mbb:
    inheritsFrom: base
    environment: { COMPOSE_PROJECT_NAME: shop }
"#,
            &[],
        )
        .unwrap();

        assert_eq!(service.docker_host_names(), vec!["base", "mbb"]);
        let mbb = service.docker_host("mbb").unwrap();
        assert_eq!(mbb.get_property("rootFolder"), Some(json!("/")));
        assert_eq!(mbb.get_property("tasks.start[0]"), Some(json!("docker compose up -d")));
    }
}
