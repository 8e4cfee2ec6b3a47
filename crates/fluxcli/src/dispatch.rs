//! Resolution and invocation of module and native commands.

use std::io::{self, Write};
use std::panic::{self, AssertUnwindSafe};

use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::module::panic_message;
use crate::registry::Registry;

/// Every way a dispatch can fail. The `Display` form is the single line shown
/// to the user.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Module '{module}' not found.")]
    ModuleNotFound { module: String },

    #[error("Command '{command}' not found in module '{module}'.")]
    CommandNotDeclared { module: String, command: String },

    #[error("Module '{module}' is not loaded; its code failed to bind.")]
    ModuleNotLoaded { module: String },

    #[error("Command '{command}' is declared but not implemented by module '{module}'.")]
    CommandNotImplemented { module: String, command: String },

    #[error("Command '{command}' in module '{module}' failed: {reason}")]
    CommandExecutionFailed {
        module: String,
        command: String,
        reason: String,
    },

    #[error("Native command '{command}' not recognized.")]
    NativeCommandNotFound { command: String },

    #[error("Failed to write command output: {0}")]
    Output(#[from] io::Error),
}

pub struct Dispatcher {
    registry: Registry,
}

impl Dispatcher {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Resolves `module`/`command` and runs the bound operation. Trailing
    /// arguments left out by the caller are filled from the descriptor's
    /// declared defaults.
    pub fn invoke(
        &self,
        module: &str,
        command: &str,
        args: &[String],
    ) -> Result<Value, DispatchError> {
        let entry = self
            .registry
            .module(module)
            .ok_or_else(|| DispatchError::ModuleNotFound {
                module: module.to_string(),
            })?;

        let Some(spec) = entry.commands().get(command) else {
            return Err(DispatchError::CommandNotDeclared {
                module: module.to_string(),
                command: command.to_string(),
            });
        };

        let provider = entry.provider().ok_or_else(|| DispatchError::ModuleNotLoaded {
            module: module.to_string(),
        })?;

        let operation = provider.operations().get(command).ok_or_else(|| {
            DispatchError::CommandNotImplemented {
                module: module.to_string(),
                command: command.to_string(),
            }
        })?;

        let args = spec.with_defaults(args);
        debug!(module, command, ?args, "Invoking module operation");
        let failed = |reason: String| DispatchError::CommandExecutionFailed {
            module: module.to_string(),
            command: command.to_string(),
            reason,
        };

        match panic::catch_unwind(AssertUnwindSafe(|| operation(&args))) {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => Err(failed(e.to_string())),
            Err(payload) => Err(failed(format!(
                "panicked: {}",
                panic_message(payload.as_ref())
            ))),
        }
    }

    /// Runs a module command and writes its result to `out` as pretty JSON.
    pub fn dispatch_module(
        &self,
        module: &str,
        command: &str,
        args: &[String],
        out: &mut dyn Write,
    ) -> Result<(), DispatchError> {
        let value = self.invoke(module, command, args)?;
        let rendered = serde_json::to_string_pretty(&value).map_err(|e| {
            DispatchError::CommandExecutionFailed {
                module: module.to_string(),
                command: command.to_string(),
                reason: format!("result could not be serialized: {}", e),
            }
        })?;

        writeln!(out, "{}", rendered)?;
        Ok(())
    }

    /// Acknowledges a native command. Native commands carry no executable
    /// binding.
    pub fn dispatch_native(
        &self,
        command: &str,
        args: &[String],
        out: &mut dyn Write,
    ) -> Result<(), DispatchError> {
        if !self.registry.has_native_command(command) {
            return Err(DispatchError::NativeCommandNotFound {
                command: command.to_string(),
            });
        }

        debug!(command, ?args, "Native command received");
        writeln!(
            out,
            "Running native command '{}'. No custom logic implemented.",
            command
        )?;
        Ok(())
    }
}
