use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
};

use fluxcli_api::CapabilityProvider;
use tracing::{debug, instrument, warn};

use super::{BindError, ModuleCatalog};
use crate::registry::NATIVE_BUCKET;

/// File whose presence makes a directory under the modules root a module.
pub const MODULE_MARKER: &str = ".fluxmodule";

/// Optional per-module descriptor declaring the module's commands.
pub const DESCRIPTOR_FILE: &str = "commands.yaml";

pub struct ModuleResolver {
    root: PathBuf,
    catalog: ModuleCatalog,
}

impl ModuleResolver {
    pub fn new(root: impl Into<PathBuf>, catalog: ModuleCatalog) -> Self {
        Self {
            root: root.into(),
            catalog,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn catalog(&self) -> &ModuleCatalog {
        &self.catalog
    }

    pub fn descriptor_path(&self, module: &str) -> PathBuf {
        self.root.join(module).join(DESCRIPTOR_FILE)
    }

    /// Names of every module package under the root.
    ///
    /// An unreadable root yields no modules rather than an error, so the host
    /// still starts.
    #[instrument(skip(self), fields(root = %self.root.display()), name = "resolver: discover")]
    pub fn discover(&self) -> BTreeSet<String> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Cannot read modules root, starting without modules: {}", e);
                return BTreeSet::new();
            }
        };

        let mut modules = BTreeSet::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            let path = entry.path();
            if !path.is_dir() || !path.join(MODULE_MARKER).is_file() {
                continue;
            }

            let Some(name) = entry.file_name().to_str().map(str::to_string) else {
                warn!(path = %path.display(), "Skipping module with a non UTF-8 name");
                continue;
            };

            if name == NATIVE_BUCKET {
                warn!(
                    module = %name,
                    "Skipping module whose name is reserved for native commands"
                );
                continue;
            }

            debug!(module = %name, "Discovered module");
            modules.insert(name);
        }

        modules
    }

    pub fn try_bind(&self, module: &str) -> Result<CapabilityProvider, BindError> {
        self.catalog.instantiate(module)
    }

    /// Binds the executable unit of `module`. Failures are reported as
    /// warnings and leave the module without a provider.
    #[instrument(skip(self), name = "resolver: bind")]
    pub fn bind(&self, module: &str) -> Option<CapabilityProvider> {
        match self.try_bind(module) {
            Ok(provider) => {
                debug!(operations = provider.operations().len(), "Module bound");
                Some(provider)
            }
            Err(e) => {
                warn!(
                    module,
                    error = &e as &dyn std::error::Error,
                    "Module is listed but not loaded"
                );
                None
            }
        }
    }
}
