//! Descriptor and settings management for FluxCLI.
//!
//! Module and native command descriptors are YAML files of the shape
//! `{commands: {<name>: {description, usage, args}}}`. User settings live in
//! a per-user YAML file and are never fatal to load.

pub mod error;
pub mod loader;
pub mod models;

pub use error::ConfigError;
pub use loader::{
    default_settings_path, load_descriptor, load_settings, save_settings, try_load_settings,
};
pub use models::descriptor::{ArgSpec, CommandSpec, DescriptorFile, ModuleDescriptor};
pub use models::logging::LoggingConfig;
pub use models::settings::{DEFAULT_PROMPT, UserSettings};
