//! FluxCLI - an extensible command-line shell
//!
//! The host discovers modules under a modules root, merges their declared
//! commands with the native (moduleless) commands into a [`Registry`], and
//! dispatches input from the REPL or from process arguments to the bound
//! module operations.

pub mod cli;
pub mod dispatch;
pub mod module;
pub mod paths;
pub mod registry;
pub mod telemetry;

pub use cli::{OneShotError, Repl, SessionState, Transition, UsageError, run_oneshot};
pub use dispatch::{DispatchError, Dispatcher};
pub use module::{BindError, ModuleCatalog, ModuleResolver};
pub use paths::HostPaths;
pub use registry::{ModuleEntry, NATIVE_BUCKET, Registry, RegistryError, SyncIssue};

/// Modules root used when neither the command line nor the settings name one,
/// relative to the executable's directory.
pub const DEFAULT_MODULES_DIR: &str = "modules";

/// Native descriptor used when neither the command line nor the settings name
/// one, relative to the executable's directory.
pub const DEFAULT_NATIVE_DESCRIPTOR: &str = "config/commands.yaml";

pub const PROGRAM_NAME: &str = "fluxcli";
