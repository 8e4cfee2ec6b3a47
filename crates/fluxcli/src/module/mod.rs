//! Module discovery and binding.

mod catalog;
mod resolver;

use std::any::Any;

use fluxcli_api::ModuleError;
use thiserror::Error;

pub use catalog::{ModuleCatalog, ModuleFactory};
pub use resolver::{DESCRIPTOR_FILE, MODULE_MARKER, ModuleResolver};

/// Why a module's executable unit could not be bound.
#[derive(Debug, Error)]
pub enum BindError {
    #[error("no executable unit registered as '{unit}'")]
    UnitNotFound { unit: String },

    #[error("'{unit}' failed to initialize")]
    Init {
        unit: String,
        #[source]
        source: ModuleError,
    },

    #[error("'{unit}' panicked during initialization: {message}")]
    Panicked { unit: String, message: String },
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
