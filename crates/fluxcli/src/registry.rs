//! The merged command registry.
//!
//! Built once per process from the modules root and the native descriptor,
//! read-only afterwards.

use std::collections::BTreeMap;
use std::path::Path;

use fluxcli_api::CapabilityProvider;
use fluxcli_config::{CommandSpec, ConfigError, ModuleDescriptor, load_descriptor};
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::module::ModuleResolver;

/// Reserved bucket holding the native (moduleless) commands.
pub const NATIVE_BUCKET: &str = "_native_";

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("failed to load commands of module '{module}'")]
    ModuleDescriptor {
        module: String,
        #[source]
        source: ConfigError,
    },

    #[error("failed to load native commands")]
    NativeDescriptor(#[source] ConfigError),
}

/// A command declared by a module's descriptor that its provider does not
/// implement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncIssue {
    pub module: String,
    pub command: String,
}

#[derive(Debug, Clone)]
pub struct ModuleEntry {
    descriptor: ModuleDescriptor,
    provider: Option<CapabilityProvider>,
}

impl ModuleEntry {
    pub fn new(descriptor: ModuleDescriptor, provider: Option<CapabilityProvider>) -> Self {
        Self {
            descriptor,
            provider,
        }
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn descriptor(&self) -> &ModuleDescriptor {
        &self.descriptor
    }

    pub fn commands(&self) -> &BTreeMap<String, CommandSpec> {
        &self.descriptor.commands
    }

    pub fn declares(&self, command: &str) -> bool {
        self.descriptor.commands.contains_key(command)
    }

    pub fn provider(&self) -> Option<&CapabilityProvider> {
        self.provider.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.provider.is_some()
    }

    fn sync_issues(&self) -> Vec<SyncIssue> {
        let Some(provider) = &self.provider else {
            return Vec::new();
        };

        self.descriptor
            .commands
            .keys()
            .filter(|command| !provider.has_operation(command))
            .map(|command| SyncIssue {
                module: self.descriptor.name.clone(),
                command: command.clone(),
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct Registry {
    modules: BTreeMap<String, ModuleEntry>,
    native: BTreeMap<String, CommandSpec>,
    sync_issues: Vec<SyncIssue>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self {
            modules: BTreeMap::new(),
            native: BTreeMap::new(),
            sync_issues: Vec::new(),
        }
    }

    /// Discovers every module, loads its descriptor, binds its provider, then
    /// loads the native commands.
    ///
    /// Bind failures only degrade the affected module. A malformed
    /// descriptor aborts the build.
    #[instrument(
        skip(resolver, native_descriptor),
        fields(root = %resolver.root().display()),
        name = "registry: build"
    )]
    pub fn build(
        resolver: &ModuleResolver,
        native_descriptor: &Path,
    ) -> Result<Self, RegistryError> {
        let mut registry = Self::new();

        for module in resolver.discover() {
            let commands = load_descriptor(&resolver.descriptor_path(&module)).map_err(
                |source| RegistryError::ModuleDescriptor {
                    module: module.clone(),
                    source,
                },
            )?;
            let provider = resolver.bind(&module);
            registry.insert_module(ModuleDescriptor::new(module, commands), provider);
        }

        let native =
            load_descriptor(native_descriptor).map_err(RegistryError::NativeDescriptor)?;
        registry.set_native_commands(native);

        info!(
            modules = registry.modules.len(),
            native_commands = registry.native.len(),
            "Command registry built"
        );
        Ok(registry)
    }

    /// Inserts a module, replacing any previous module of the same name.
    pub fn insert_module(
        &mut self,
        descriptor: ModuleDescriptor,
        provider: Option<CapabilityProvider>,
    ) -> &mut Self {
        let entry = ModuleEntry::new(descriptor, provider);
        let name = entry.name().to_string();

        if let Some(provider) = entry.provider() {
            for operation in provider.operations().names() {
                if !entry.declares(operation) {
                    debug!(
                        module = %name,
                        operation,
                        "Operation is not declared by the descriptor"
                    );
                }
            }
        }

        let issues = entry.sync_issues();
        for issue in &issues {
            warn!(
                module = %issue.module,
                command = %issue.command,
                "Command is declared but not implemented"
            );
        }

        self.sync_issues.retain(|issue| issue.module != name);
        self.sync_issues.extend(issues);
        if self.modules.insert(name.clone(), entry).is_some() {
            warn!(module = %name, "Duplicate module name, keeping the last one discovered");
        }
        self
    }

    pub fn set_native_commands(&mut self, commands: BTreeMap<String, CommandSpec>) -> &mut Self {
        self.native = commands;
        self
    }

    /// Module names in lexicographic order. The native bucket is not a module.
    pub fn list_modules(&self) -> Vec<&str> {
        self.modules.keys().map(String::as_str).collect()
    }

    /// Command names and descriptions of `module`; empty if unknown.
    pub fn list_commands(&self, module: &str) -> BTreeMap<&str, &str> {
        self.modules
            .get(module)
            .map(|entry| describe(entry.commands()))
            .unwrap_or_default()
    }

    pub fn list_native_commands(&self) -> BTreeMap<&str, &str> {
        describe(&self.native)
    }

    pub fn has_module(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    pub fn has_native_command(&self, name: &str) -> bool {
        self.native.contains_key(name)
    }

    pub fn is_loaded(&self, module: &str) -> bool {
        self.modules.get(module).is_some_and(ModuleEntry::is_loaded)
    }

    pub fn module(&self, name: &str) -> Option<&ModuleEntry> {
        self.modules.get(name)
    }

    pub fn native_command(&self, name: &str) -> Option<&CommandSpec> {
        self.native.get(name)
    }

    pub fn sync_issues(&self) -> &[SyncIssue] {
        &self.sync_issues
    }
}

fn describe(commands: &BTreeMap<String, CommandSpec>) -> BTreeMap<&str, &str> {
    commands
        .iter()
        .map(|(name, spec)| (name.as_str(), spec.description.as_str()))
        .collect()
}
