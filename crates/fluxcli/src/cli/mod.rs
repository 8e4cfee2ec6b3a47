//! Command-line interface: the interactive REPL and the one-shot entry.

pub mod format;
pub mod oneshot;
pub mod repl;
pub mod session;

pub use oneshot::{OneShotError, UsageError, run_oneshot};
pub use repl::{Repl, Transition};
pub use session::{Input, SessionState};
