use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};

use fluxcli_api::{CapabilityProvider, Module, ModuleError};
use fluxcli_module_nmap::NmapModule;
use tracing::debug;

use super::{BindError, panic_message};

pub type ModuleFactory = Box<dyn Fn() -> Result<Box<dyn Module>, ModuleError> + Send + Sync>;

/// Executable module units known to this build, keyed by unit path
/// (`modules.<name>.module`).
#[derive(Default)]
pub struct ModuleCatalog {
    units: HashMap<String, ModuleFactory>,
}

impl ModuleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog of every module bundled with the host.
    pub fn builtin() -> Self {
        let mut catalog = Self::new();
        catalog.register("nmap", || Ok(Box::new(NmapModule::new()) as Box<dyn Module>));
        catalog
    }

    pub fn unit_path(module: &str) -> String {
        format!("modules.{}.module", module)
    }

    pub fn register<F>(&mut self, module: &str, factory: F) -> &mut Self
    where
        F: Fn() -> Result<Box<dyn Module>, ModuleError> + Send + Sync + 'static,
    {
        let unit = Self::unit_path(module);
        debug!(unit = %unit, "Registering module unit");
        self.units.insert(unit, Box::new(factory));
        self
    }

    pub fn contains(&self, module: &str) -> bool {
        self.units.contains_key(&Self::unit_path(module))
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Runs the factory of `module` and binds its operations. Panics raised by
    /// module code are contained here.
    pub fn instantiate(&self, module: &str) -> Result<CapabilityProvider, BindError> {
        let unit = Self::unit_path(module);
        let factory = self
            .units
            .get(&unit)
            .ok_or_else(|| BindError::UnitNotFound { unit: unit.clone() })?;

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let instance = factory()?;
            let provider = CapabilityProvider::bind(instance.as_ref())?;
            Ok::<_, ModuleError>(
                CapabilityProvider::new(module, provider.operations().clone())
                    .with_description(provider.description()),
            )
        }));

        match outcome {
            Ok(Ok(provider)) => Ok(provider),
            Ok(Err(source)) => Err(BindError::Init { unit, source }),
            Err(payload) => Err(BindError::Panicked {
                unit,
                message: panic_message(payload.as_ref()),
            }),
        }
    }
}
