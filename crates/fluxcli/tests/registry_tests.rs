mod common;

use std::fs;

use common::{Fixture, strings, write_module};
use fluxcli::{
    DispatchError, Dispatcher, ModuleCatalog, ModuleResolver, NATIVE_BUCKET, OneShotError,
    Registry, RegistryError, UsageError, run_oneshot,
};

#[test]
fn test_failed_bind_is_listed_but_not_loaded() {
    let fixture = Fixture::new();
    let registry = fixture.build();

    assert_eq!(registry.list_modules(), vec!["alpha", "beta"]);
    assert!(registry.is_loaded("alpha"));
    assert!(!registry.is_loaded("beta"));
    assert!(!registry.list_modules().contains(&NATIVE_BUCKET));
    assert!(registry.has_native_command("version"));

    let dispatcher = Dispatcher::new(registry);
    let err = dispatcher.invoke("beta", "scan", &strings(&["y"])).unwrap_err();
    assert!(matches!(err, DispatchError::ModuleNotLoaded { ref module } if module == "beta"));
    assert!(err.to_string().contains("beta"));
}

#[test]
fn test_unknown_module_never_invokes_a_provider() {
    let fixture = Fixture::new();
    let dispatcher = Dispatcher::new(fixture.build());

    for module in ["gamma", "ALPHA", NATIVE_BUCKET, ""] {
        let err = dispatcher.invoke(module, "ping", &[]).unwrap_err();
        assert!(matches!(err, DispatchError::ModuleNotFound { .. }));
    }
    assert!(fixture.calls().is_empty());
}

#[test]
fn test_dispatch_passes_arguments_positionally() {
    let fixture = Fixture::new();
    let dispatcher = Dispatcher::new(fixture.build());
    let mut out = Vec::new();

    dispatcher
        .dispatch_module("alpha", "ping", &strings(&["x", "y"]), &mut out)
        .unwrap();

    assert_eq!(
        fixture.calls(),
        vec![("ping".to_string(), strings(&["x", "y"]))]
    );
    let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(value, serde_json::json!({ "pong": ["x", "y"] }));
}

#[test]
fn test_build_is_idempotent() {
    let fixture = Fixture::new();
    let first = fixture.build();
    let second = fixture.build();

    assert_eq!(first.list_modules(), second.list_modules());
    for module in first.list_modules() {
        assert_eq!(
            first.module(module).unwrap().descriptor(),
            second.module(module).unwrap().descriptor()
        );
    }
    assert_eq!(first.list_native_commands(), second.list_native_commands());
}

#[test]
fn test_module_without_descriptor_has_no_commands() {
    let fixture = Fixture::new();
    let dir = fixture.modules_root().join("empty");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(fluxcli::module::MODULE_MARKER), "").unwrap();

    let registry = fixture.build();
    assert!(registry.has_module("empty"));
    assert!(registry.list_commands("empty").is_empty());
    assert!(!registry.is_loaded("empty"));
}

#[test]
fn test_malformed_module_descriptor_aborts_build() {
    let fixture = Fixture::new();
    write_module(&fixture.modules_root(), "broken", "commands: {ping: [\n");

    let resolver = ModuleResolver::new(fixture.modules_root(), fixture.catalog());
    let err = Registry::build(&resolver, &fixture.native_descriptor()).unwrap_err();
    assert!(matches!(
        err,
        RegistryError::ModuleDescriptor { ref module, .. } if module == "broken"
    ));
}

#[test]
fn test_missing_native_descriptor_is_empty() {
    let fixture = Fixture::new();
    let resolver = ModuleResolver::new(fixture.modules_root(), fixture.catalog());
    let registry = Registry::build(&resolver, &fixture.dir.path().join("absent.yaml")).unwrap();

    assert!(registry.list_native_commands().is_empty());
    assert_eq!(registry.list_modules(), vec!["alpha", "beta"]);
}

#[test]
fn test_missing_modules_root_still_starts() {
    let fixture = Fixture::new();
    let resolver = ModuleResolver::new(fixture.dir.path().join("nowhere"), ModuleCatalog::new());
    let registry = Registry::build(&resolver, &fixture.native_descriptor()).unwrap();

    assert!(registry.list_modules().is_empty());
    assert!(registry.has_native_command("version"));
}

#[test]
fn test_declared_but_unimplemented_command() {
    let fixture = Fixture::new();
    write_module(
        &fixture.modules_root(),
        "alpha",
        "commands:\n  ping: {}\n  trace:\n    description: Not implemented\n",
    );

    let registry = fixture.build();
    assert!(
        registry
            .sync_issues()
            .iter()
            .any(|issue| issue.module == "alpha" && issue.command == "trace")
    );

    let dispatcher = Dispatcher::new(registry);
    assert!(matches!(
        dispatcher.invoke("alpha", "trace", &[]),
        Err(DispatchError::CommandNotImplemented { .. })
    ));
}

#[test]
fn test_oneshot_module_without_command_is_usage_error() {
    let fixture = Fixture::new();
    let dispatcher = Dispatcher::new(fixture.build());
    let mut out = Vec::new();

    let err = run_oneshot(&dispatcher, &strings(&["alpha"]), &mut out).unwrap_err();
    assert!(matches!(err, OneShotError::Usage(UsageError::MissingCommand { .. })));
    assert_ne!(err.exit_code(), 0);
    assert!(out.is_empty());
    assert!(fixture.calls().is_empty());
}

#[test]
fn test_oneshot_dispatch() {
    let fixture = Fixture::new();
    let dispatcher = Dispatcher::new(fixture.build());

    let mut out = Vec::new();
    run_oneshot(&dispatcher, &strings(&["alpha", "ping", "x"]), &mut out).unwrap();
    assert_eq!(fixture.calls(), vec![("ping".to_string(), strings(&["x"]))]);

    let mut out = Vec::new();
    run_oneshot(&dispatcher, &strings(&["version", "--short"]), &mut out).unwrap();
    assert!(String::from_utf8(out).unwrap().contains("native command 'version'"));

    let err = run_oneshot(&dispatcher, &strings(&["beta", "scan"]), &mut Vec::new()).unwrap_err();
    assert_eq!(err.exit_code(), 1);

    let err = run_oneshot(&dispatcher, &strings(&["unknown"]), &mut Vec::new()).unwrap_err();
    assert!(matches!(
        err,
        OneShotError::Dispatch(DispatchError::NativeCommandNotFound { .. })
    ));
}

#[test]
fn test_malformed_native_descriptor_aborts_build() {
    let fixture = Fixture::new();
    fs::write(fixture.native_descriptor(), "commands: [bad]\n").unwrap();

    let resolver = ModuleResolver::new(fixture.modules_root(), fixture.catalog());
    let err = Registry::build(&resolver, &fixture.native_descriptor()).unwrap_err();
    assert!(matches!(err, RegistryError::NativeDescriptor(_)));

    let error = anyhow::Error::new(err).context("failed to build command registry");
    let cause = error.root_cause().to_string();
    let report = format!("{:#}", error);
    assert!(report.starts_with(
        "failed to build command registry: failed to load native commands: malformed descriptor"
    ));
    assert!(report.contains("commands.yaml"));
    assert!(!cause.is_empty());
    assert_eq!(report.matches(cause.as_str()).count(), 1);
}

#[test]
fn test_declared_defaults_fill_missing_arguments() {
    let fixture = Fixture::new();
    write_module(
        &fixture.modules_root(),
        "alpha",
        "commands:\n  ping:\n    args:\n      - name: host\n        required: false\n        \
         default: localhost\n",
    );
    let dispatcher = Dispatcher::new(fixture.build());

    dispatcher.invoke("alpha", "ping", &[]).unwrap();
    dispatcher.invoke("alpha", "ping", &strings(&["example.org"])).unwrap();
    assert_eq!(
        fixture.calls(),
        vec![
            ("ping".to_string(), strings(&["localhost"])),
            ("ping".to_string(), strings(&["example.org"])),
        ]
    );
}
