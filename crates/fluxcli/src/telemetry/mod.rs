//! Tracing subscriber setup.
//!
//! Diagnostics go to stderr so stdout only carries command results.

use std::io::IsTerminal;

use fluxcli_config::LoggingConfig;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_DIRECTIVE: &str = "warn";
const DEBUG_DIRECTIVE: &str =
    "warn,fluxcli=debug,fluxcli_config=debug,fluxcli_api=debug,fluxcli_module_nmap=debug";

/// Filter directive for the given settings: `RUST_LOG` wins, then an
/// explicit `logging.level`, then the verbosity switches.
pub fn filter_directive(config: &LoggingConfig, verbose: bool, env: Option<&str>) -> String {
    if let Some(env) = env.filter(|value| !value.trim().is_empty()) {
        return env.to_string();
    }
    if let Some(level) = &config.level {
        return level.clone();
    }
    if verbose || config.debug {
        DEBUG_DIRECTIVE.to_string()
    } else {
        DEFAULT_DIRECTIVE.to_string()
    }
}

/// Colored log output needs both the setting and a terminal on stderr.
pub fn use_ansi(config: &LoggingConfig, stderr_is_terminal: bool) -> bool {
    config.use_color && stderr_is_terminal
}

pub fn init_subscriber(config: &LoggingConfig, verbose: bool) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directive = filter_directive(config, verbose, env.as_deref());

    let filter =
        EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_level(true)
        .with_target(false)
        .with_ansi(use_ansi(config, std::io::stderr().is_terminal()))
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
