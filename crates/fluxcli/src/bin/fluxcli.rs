//! FluxCLI - extensible command-line shell
//!
//! With no arguments the shell starts its REPL; otherwise the arguments are
//! dispatched once (`fluxcli <module> <command> [args...]` or
//! `fluxcli <nativeCommand> [args...]`).

use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use fluxcli::cli::format as fmt;
use fluxcli::{
    Dispatcher, HostPaths, ModuleCatalog, ModuleResolver, OneShotError, Registry, Repl, paths,
    run_oneshot, telemetry,
};
use fluxcli_config::{UserSettings, default_settings_path, try_load_settings};
use tracing::{debug, warn};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory containing one subdirectory per module
    #[arg(long, env = "FLUXCLI_MODULES_DIR")]
    modules_dir: Option<PathBuf>,

    /// Descriptor file declaring the native commands
    #[arg(long, env = "FLUXCLI_NATIVE_COMMANDS")]
    native_commands: Option<PathBuf>,

    /// User settings file
    #[arg(long, env = "FLUXCLI_SETTINGS")]
    settings: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// `<module> <command> [args...]` or `<nativeCommand> [args...]`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

fn main() {
    let args = Args::parse();

    let settings_path = args.settings.clone().or_else(default_settings_path);
    let (settings, settings_error) = match settings_path.as_deref().map(try_load_settings) {
        Some(Ok(settings)) => (settings, None),
        Some(Err(e)) => (UserSettings::default(), Some(e)),
        None => (UserSettings::default(), None),
    };

    telemetry::init_subscriber(&settings.logging, args.verbose);
    if let Some(e) = settings_error {
        warn!(
            error = &e as &dyn std::error::Error,
            "Failed to read settings, using defaults"
        );
    }
    if !settings.logging.use_color {
        fmt::set_colors_enabled(false);
    }

    match run(args, settings) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("{}", fmt::error(&format!("Error: {:#}", e)));
            process::exit(1);
        }
    }
}

fn run(args: Args, settings: UserSettings) -> anyhow::Result<i32> {
    let HostPaths {
        modules_dir,
        native_commands,
    } = HostPaths::resolve(
        args.modules_dir,
        args.native_commands,
        &settings,
        paths::install_dir().as_deref(),
    );
    debug!(
        modules_dir = %modules_dir.display(),
        native_commands = %native_commands.display(),
        "Resolved host paths"
    );

    let resolver = ModuleResolver::new(modules_dir, ModuleCatalog::builtin());
    let registry = Registry::build(&resolver, &native_commands)
        .context("failed to build command registry")?;
    let dispatcher = Dispatcher::new(registry);

    let mut out = io::stdout();

    if args.command.is_empty() {
        ctrlc::set_handler(|| {
            println!("\nExiting.");
            process::exit(0);
        })
        .context("failed to install interrupt handler")?;

        let stdin = io::stdin();
        let interactive = stdin.is_terminal();
        Repl::new(&dispatcher)
            .with_prompt(settings.prompt)
            .interactive(interactive)
            .run(stdin.lock(), &mut out, &mut io::stderr())?;
        return Ok(0);
    }

    match run_oneshot(&dispatcher, &args.command, &mut out) {
        Ok(()) => {
            out.flush()?;
            Ok(0)
        }
        Err(e) => {
            out.flush()?;
            match &e {
                OneShotError::Usage(usage) => eprintln!("{}", usage),
                OneShotError::Dispatch(dispatch) => {
                    eprintln!("{}", fmt::error(&format!("Error: {}", dispatch)))
                }
            }
            Ok(e.exit_code())
        }
    }
}
