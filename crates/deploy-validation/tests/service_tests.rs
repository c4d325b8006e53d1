//! Integration tests for the validation service

use deploy_tree::{Node, Source};
use deploy_validation::{Error, ValidationErrors, ValidationService};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

fn host(value: Value) -> Node {
    Node::new(value, &Source::new("fabfile.yaml"))
}

#[rstest]
#[case::missing(json!({}), 1)]
#[case::wrong_type(json!({"needs": "ssh"}), 1)]
#[case::sequence(json!({"needs": ["ssh"]}), 0)]
#[case::mapping(json!({"needs": {"a": "ssh"}}), 0)]
fn is_array_records_at_most_one_error(#[case] config: Value, #[case] expected: usize) {
    let node = host(config);
    let mut errors = ValidationErrors::new();
    ValidationService::new(&node, &mut errors, "host `web`").is_array("needs", "list of methods");
    assert_eq!(errors.len(), expected);
}

#[rstest]
#[case::valid("prod", true)]
#[case::invalid("production", false)]
fn is_one_of(#[case] value: &str, #[case] valid: bool) {
    let node = host(json!({"type": value}));
    let mut errors = ValidationErrors::new();
    let ok = ValidationService::new(&node, &mut errors, "host `web`")
        .is_one_of("type", &["dev", "stage", "prod", "test"]);
    assert_eq!(ok, valid);
    assert_eq!(errors.has_errors(), !valid);
    if !valid {
        assert!(errors.errors()[0].contains("production"));
        assert!(errors.errors()[0].contains("dev, stage, prod, test"));
    }
}

#[test]
fn is_one_of_on_missing_key_records_one_error() {
    let node = host(json!({}));
    let mut errors = ValidationErrors::new();
    ValidationService::new(&node, &mut errors, "host `web`").is_one_of("type", &["dev"]);
    assert_eq!(errors.len(), 1);
}

#[rstest]
#[case::root("/", true)]
#[case::plain("/var/www", true)]
#[case::relative("web", true)]
#[case::trailing("/var/www/", false)]
fn folder_names(#[case] folder: &str, #[case] valid: bool) {
    let node = host(json!({"rootFolder": folder}));
    let mut errors = ValidationErrors::new();
    let ok = ValidationService::new(&node, &mut errors, "host `web`")
        .check_for_valid_folder_name("rootFolder");
    assert_eq!(ok, valid);
    assert_eq!(errors.len(), usize::from(!valid));
}

#[test]
fn deprecate_only_warns() {
    let node = host(json!({"runLocally": true}));
    let mut errors = ValidationErrors::new();
    ValidationService::new(&node, &mut errors, "host `web`").deprecate([
        ("runLocally", "use `needs: [local]` instead"),
        ("useShell", "not needed anymore"),
    ]);

    assert!(!errors.has_errors());
    assert_eq!(errors.warnings().len(), 1);
    assert!(errors.warnings()["runLocally"].contains("needs: [local]"));
}

#[test]
fn one_bag_collects_problems_from_several_configs() {
    let web = host(json!({"type": "prod", "rootFolder": "/srv/"}));
    let db = host(json!({"rootFolder": "/srv"}));
    let mut errors = ValidationErrors::new();

    for (name, config) in [("web", &web), ("db", &db)] {
        let mut service = ValidationService::new(config, &mut errors, format!("host `{name}`"));
        service.is_one_of("type", &["dev", "prod"]);
        service.check_for_valid_folder_name("rootFolder");
    }

    assert_eq!(errors.keys(), ["rootFolder", "type"]);
    assert!(errors.errors()[0].contains("host `web`"));
    assert!(errors.errors()[1].contains("host `db`"));

    let err = errors.into_result().unwrap_err();
    assert!(matches!(err, Error::ValidationFailed(ref bag) if bag.len() == 2));
}
