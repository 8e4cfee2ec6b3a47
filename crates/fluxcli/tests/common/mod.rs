#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use fluxcli::{ModuleCatalog, ModuleResolver, Registry};
use fluxcli_api::{Module, ModuleError, OperationTable, json};
use tempfile::TempDir;

pub type CallLog = Arc<Mutex<Vec<(String, Vec<String>)>>>;

/// Test module recording every call it receives.
pub struct Alpha {
    pub calls: CallLog,
}

impl Module for Alpha {
    fn name(&self) -> &'static str {
        "alpha"
    }

    fn description(&self) -> &'static str {
        "Records its calls"
    }

    fn register(&self, table: &mut OperationTable) -> Result<(), ModuleError> {
        let calls = self.calls.clone();
        table.insert("ping", move |args| {
            calls
                .lock()
                .unwrap()
                .push(("ping".to_string(), args.to_vec()));
            Ok(json!({ "pong": args }))
        });
        table.insert("crash", |_| panic!("alpha crashed"));
        Ok(())
    }
}

pub struct Fixture {
    pub dir: TempDir,
    pub calls: CallLog,
}

impl Fixture {
    /// Modules root with `alpha` (declares `ping` and `crash`, binds) and
    /// `beta` (declares `scan`, fails to bind), plus one native command.
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("modules");

        write_module(
            &root,
            "alpha",
            "commands:\n  ping:\n    description: Reply with the arguments\n  \
             crash:\n    description: Always panics\n",
        );
        write_module(
            &root,
            "beta",
            "commands:\n  scan:\n    description: Scan a target\n",
        );

        fs::create_dir_all(dir.path().join("config")).unwrap();
        fs::write(
            dir.path().join("config").join("commands.yaml"),
            "commands:\n  version:\n    description: Show the version\n",
        )
        .unwrap();

        Self {
            dir,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn modules_root(&self) -> PathBuf {
        self.dir.path().join("modules")
    }

    pub fn native_descriptor(&self) -> PathBuf {
        self.dir.path().join("config").join("commands.yaml")
    }

    pub fn catalog(&self) -> ModuleCatalog {
        let calls = self.calls.clone();
        let mut catalog = ModuleCatalog::new();
        catalog
            .register("alpha", move || {
                Ok(Box::new(Alpha {
                    calls: calls.clone(),
                }) as Box<dyn Module>)
            })
            .register("beta", || Err(ModuleError::init("scanner backend missing")));
        catalog
    }

    pub fn build(&self) -> Registry {
        let resolver = ModuleResolver::new(self.modules_root(), self.catalog());
        Registry::build(&resolver, &self.native_descriptor()).unwrap()
    }

    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

pub fn write_module(root: &Path, name: &str, descriptor: &str) {
    let dir = root.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(fluxcli::module::MODULE_MARKER), "").unwrap();
    fs::write(dir.join(fluxcli::module::DESCRIPTOR_FILE), descriptor).unwrap();
}

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}
