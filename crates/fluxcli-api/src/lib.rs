//! Module API for FluxCLI.
//!
//! A module is a self-contained extension exposing zero or more named
//! commands. Module crates implement [`Module`] and register their
//! operations into an [`OperationTable`]; the host binds that table into a
//! [`CapabilityProvider`] once at startup and dispatches by name afterwards.

mod args;
mod error;
mod module;
mod provider;

pub use args::Args;
pub use error::ModuleError;
pub use module::Module;
pub use provider::{CapabilityProvider, CommandOutput, Operation, OperationTable};

/// Re-exported so modules can build results without a direct dependency.
pub use serde_json::{Value, json};
