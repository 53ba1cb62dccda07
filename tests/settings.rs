mod common;

use std::path::PathBuf;

use bolton::{Args, BoltonError, RegistrySettings};
use common::{Animal, Describe, DescribeDispatch, labelled, setup_with};

fn temp_config(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("bolton_{}_{}.toml", name, std::process::id()));
    std::fs::write(&path, contents).expect("write config");
    path
}

#[test]
fn defaults_when_file_is_missing() {
    let path = std::env::temp_dir().join("bolton_does_not_exist.toml");
    let settings = RegistrySettings::load(&path).expect("settings");
    assert_eq!(settings, RegistrySettings::default());
    assert!(settings.injection);
    assert!(!settings.strict_dispatch);
}

#[test]
fn file_overrides_defaults() {
    let path = temp_config("overrides", "strict_dispatch = true\n");
    let settings = RegistrySettings::load(&path).expect("settings");
    assert!(settings.strict_dispatch);
    assert!(settings.injection);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn malformed_file_is_a_config_error() {
    let path = temp_config("malformed", "injection = \"sometimes\"\n");
    let err = RegistrySettings::load(&path).unwrap_err();
    assert!(matches!(err, BoltonError::Config(_)));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn strict_dispatch_rejects_undeclared_methods() {
    let registry = setup_with(RegistrySettings {
        strict_dispatch: true,
        ..RegistrySettings::default()
    });
    registry
        .implement::<Describe>()
        .for_type::<Animal>()
        .with(labelled("animal"))
        .expect("register");
    let dispatcher = registry.dispatcher::<Describe>();
    let rex = Animal::new("Rex");
    assert_eq!(dispatcher.describe(&rex).unwrap(), "animal");
    let err = dispatcher.call(&rex, "descibe", Args::new()).unwrap_err();
    assert!(matches!(
        err,
        BoltonError::UndeclaredMethod { capability: "Describe", ref method } if method == "descibe"
    ));
}

#[test]
fn open_dispatch_reports_typos_at_call_time() {
    let registry = setup_with(RegistrySettings::default());
    registry
        .implement::<Describe>()
        .for_type::<Animal>()
        .with(labelled("animal"))
        .expect("register");
    let err = registry
        .dispatcher::<Describe>()
        .call(&Animal::new("Rex"), "descibe", Args::new())
        .unwrap_err();
    assert!(matches!(err, BoltonError::MethodNotImplemented { .. }));
}
