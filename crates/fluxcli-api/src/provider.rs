use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::{Module, ModuleError};

pub type CommandOutput = Result<Value, ModuleError>;

/// A named, callable module operation. Arguments are passed positionally.
pub type Operation = Arc<dyn Fn(&[String]) -> CommandOutput + Send + Sync>;

/// Operation table of a single module: command name to typed function.
#[derive(Clone, Default)]
pub struct OperationTable {
    operations: BTreeMap<String, Operation>,
}

impl OperationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `operation` under `name`, replacing any previous entry.
    pub fn insert<F>(&mut self, name: impl Into<String>, operation: F) -> &mut Self
    where
        F: Fn(&[String]) -> CommandOutput + Send + Sync + 'static,
    {
        let name = name.into();
        if self.operations.insert(name.clone(), Arc::new(operation)).is_some() {
            debug!(operation = %name, "Replaced previously registered operation");
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&Operation> {
        self.operations.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.operations.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.operations.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

impl fmt::Debug for OperationTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.operations.keys()).finish()
    }
}

/// The executable surface bound to a module.
#[derive(Debug, Clone)]
pub struct CapabilityProvider {
    module: String,
    description: String,
    operations: OperationTable,
}

impl CapabilityProvider {
    pub fn new(module: impl Into<String>, operations: OperationTable) -> Self {
        Self {
            module: module.into(),
            description: String::new(),
            operations,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Builds the operation table of `module`.
    pub fn bind(module: &dyn Module) -> Result<Self, ModuleError> {
        let mut operations = OperationTable::new();
        module.register(&mut operations)?;
        debug!(
            module = module.name(),
            operations = operations.len(),
            "Module operations registered"
        );
        Ok(Self::new(module.name(), operations).with_description(module.description()))
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn operations(&self) -> &OperationTable {
        &self.operations
    }

    pub fn has_operation(&self, name: &str) -> bool {
        self.operations.contains(name)
    }

    /// Calls the operation `name`, or returns `None` if the provider does not
    /// expose it.
    pub fn invoke(&self, name: &str, args: &[String]) -> Option<CommandOutput> {
        self.operations.get(name).map(|operation| operation(args))
    }
}
