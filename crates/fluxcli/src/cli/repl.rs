use std::io::{self, BufRead, ErrorKind, Write};

use fluxcli_config::DEFAULT_PROMPT;
use tracing::debug;

use crate::cli::format as fmt;
use crate::cli::session::{Input, SessionState};
use crate::dispatch::{DispatchError, Dispatcher};

/// Outcome of evaluating one REPL line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Continue(SessionState),
    Exit,
}

/// Single-threaded read-eval loop over any line source.
pub struct Repl<'a> {
    dispatcher: &'a Dispatcher,
    prompt: String,
    show_prompt: bool,
}

impl<'a> Repl<'a> {
    pub fn new(dispatcher: &'a Dispatcher) -> Self {
        Self {
            dispatcher,
            prompt: DEFAULT_PROMPT.to_string(),
            show_prompt: false,
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Prints the prompt before every read. Only wanted when a person is
    /// typing.
    pub fn interactive(mut self, interactive: bool) -> Self {
        self.show_prompt = interactive;
        self
    }

    pub fn prompt_for(&self, state: &SessionState) -> String {
        match state.current_module() {
            Some(module) if self.prompt == DEFAULT_PROMPT => {
                format!("[ fluxcli:{} ] > ", module)
            }
            _ => self.prompt.clone(),
        }
    }

    /// Runs until `exit`/`quit`, end of input, or an interrupted read.
    pub fn run<R: BufRead>(
        &self,
        mut input: R,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> io::Result<()> {
        writeln!(out, "Welcome to FluxCLI!")?;
        writeln!(
            out,
            "Type 'help' for a list of commands, 'exit'/'quit' to leave.\n"
        )?;

        let mut state = SessionState::new();
        let mut line = String::new();

        loop {
            if self.show_prompt {
                write!(out, "{}", self.prompt_for(&state))?;
                out.flush()?;
            }

            line.clear();
            match input.read_line(&mut line) {
                Ok(0) => {
                    writeln!(out, "\nExiting.")?;
                    return Ok(());
                }
                Ok(_) => {}
                Err(e) if e.kind() == ErrorKind::Interrupted => {
                    writeln!(out, "\nExiting.")?;
                    return Ok(());
                }
                Err(e) if e.kind() == ErrorKind::InvalidData => {
                    writeln!(err, "{}", fmt::error("Input is not valid UTF-8, ignored."))?;
                    continue;
                }
                Err(e) => return Err(e),
            }

            match self.step(state, &line, out, err)? {
                Transition::Continue(next) => state = next,
                Transition::Exit => return Ok(()),
            }
        }
    }

    /// Evaluates one line against `state` and returns the next state.
    pub fn step(
        &self,
        state: SessionState,
        line: &str,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> io::Result<Transition> {
        let registry = self.dispatcher.registry();

        match state.parse(registry, line) {
            Input::Empty => {}
            Input::Exit => {
                writeln!(out, "{}", fmt::success("Goodbye."))?;
                return Ok(Transition::Exit);
            }
            Input::Help => match state.current_module() {
                Some(module) => self.print_module_help(module, out)?,
                None => self.print_help(out)?,
            },
            Input::Load(None) => writeln!(err, "Usage: load <moduleName>")?,
            Input::Load(Some(module)) => {
                if registry.has_module(&module) {
                    debug!(module = %module, "Switching session context");
                    writeln!(
                        out,
                        "Module '{}' loaded. Type 'help' to see commands.",
                        fmt::entity(&module)
                    )?;
                    return Ok(Transition::Continue(state.with_module(module)));
                }
                writeln!(err, "{}", fmt::error(&format!("Module '{}' not found.", module)))?;
            }
            Input::Module {
                module,
                command: None,
                ..
            } => writeln!(err, "Usage: {} <command> [args...]", module)?,
            Input::Module {
                module,
                command: Some(command),
                args,
            }
            | Input::Contextual {
                module,
                command,
                args,
            } => {
                let result = self.dispatcher.dispatch_module(&module, &command, &args, out);
                report(result, err)?;
            }
            Input::Native { command, args } => {
                let result = self.dispatcher.dispatch_native(&command, &args, out);
                report(result, err)?;
            }
        }

        Ok(Transition::Continue(state))
    }

    fn print_help(&self, out: &mut dyn Write) -> io::Result<()> {
        let registry = self.dispatcher.registry();

        writeln!(out, "{}", fmt::header("Available Modules"))?;
        let modules = registry.list_modules();
        if modules.is_empty() {
            writeln!(out, "  {}", fmt::secondary("(none installed)"))?;
        }
        for module in modules {
            let provider = registry.module(module).and_then(|entry| entry.provider());
            if let Some(provider) = provider {
                if provider.description().is_empty() {
                    writeln!(out, "  {}", fmt::entity(module))?;
                } else {
                    writeln!(
                        out,
                        "  {} - {}",
                        fmt::entity(module),
                        fmt::secondary(provider.description())
                    )?;
                }
            } else {
                writeln!(
                    out,
                    "  {} {}",
                    fmt::entity(module),
                    fmt::warning("(not loaded)")
                )?;
            }
        }

        writeln!(out, "Use: load <moduleName> to switch context to a module.")?;
        writeln!(
            out,
            "To run a module command directly: <moduleName> <command> [args...]"
        )?;
        writeln!(out, "To run a native command: <nativeCmd>")?;

        let native = registry.list_native_commands();
        if !native.is_empty() {
            writeln!(out, "{}", fmt::header("Native Commands"))?;
            for (name, description) in native {
                writeln!(out, "  {} - {}", fmt::entity(name), fmt::secondary(description))?;
            }
        }
        Ok(())
    }

    fn print_module_help(&self, module: &str, out: &mut dyn Write) -> io::Result<()> {
        let Some(entry) = self.dispatcher.registry().module(module) else {
            return writeln!(out, "No module named '{}' found in registry.", module);
        };

        if entry.commands().is_empty() {
            return writeln!(out, "No commands found for module '{}'.", module);
        }

        writeln!(
            out,
            "{}",
            fmt::header(&format!("Commands in module '{}'", module))
        )?;
        for (name, spec) in entry.commands() {
            writeln!(
                out,
                "  {} - {}",
                fmt::entity(&spec.usage_line(name)),
                fmt::secondary(&spec.description)
            )?;
        }

        if !entry.is_loaded() {
            writeln!(
                out,
                "{}",
                fmt::warning("This module failed to load; its commands cannot run.")
            )?;
        }
        Ok(())
    }
}

/// Prints a dispatch failure as one line. Only a broken error stream is
/// propagated.
fn report(result: Result<(), DispatchError>, err: &mut dyn Write) -> io::Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(e) => {
            debug!(error = ?e, "Dispatch failed");
            writeln!(err, "{}", fmt::error(&format!("Error: {}", e)))
        }
    }
}
