use std::io::Write;

use thiserror::Error;
use tracing::debug;

use crate::dispatch::{DispatchError, Dispatcher};

#[derive(Debug, Error)]
pub enum UsageError {
    #[error("Usage: fluxcli {module} <command> [args...]")]
    MissingCommand { module: String },

    #[error("Usage: fluxcli <module> <command> [args...] | fluxcli <nativeCommand> [args...]")]
    NoArguments,
}

#[derive(Debug, Error)]
pub enum OneShotError {
    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

impl OneShotError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            OneShotError::Usage(_) => 2,
            OneShotError::Dispatch(_) => 1,
        }
    }
}

/// Dispatches a single invocation taken from the process arguments.
///
/// `argv` is `[moduleOrCommand, rest...]`. A known module requires a command
/// name in `rest[0]`; anything else is a native command.
pub fn run_oneshot(
    dispatcher: &Dispatcher,
    argv: &[String],
    out: &mut dyn Write,
) -> Result<(), OneShotError> {
    let (first, rest) = argv.split_first().ok_or(UsageError::NoArguments)?;

    if dispatcher.registry().has_module(first) {
        let (command, args) = rest.split_first().ok_or_else(|| UsageError::MissingCommand {
            module: first.clone(),
        })?;
        debug!(module = %first, command = %command, "One-shot module dispatch");
        dispatcher.dispatch_module(first, command, args, out)?;
    } else {
        debug!(command = %first, "One-shot native dispatch");
        dispatcher.dispatch_native(first, rest, out)?;
    }

    Ok(())
}
