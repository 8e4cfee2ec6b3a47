//! Session context and the REPL line grammar.

use crate::registry::Registry;

/// REPL session context: the module bare commands are resolved against.
///
/// Values are never mutated in place; `load` produces a new state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    current_module: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_module(&self) -> Option<&str> {
        self.current_module.as_deref()
    }

    pub fn with_module(&self, module: impl Into<String>) -> Self {
        Self {
            current_module: Some(module.into()),
        }
    }

    /// Classifies `line` against the grammar, given this context and the
    /// modules known to `registry`.
    pub fn parse(&self, registry: &Registry, line: &str) -> Input {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some((&first, rest)) = tokens.split_first() else {
            return Input::Empty;
        };
        let rest: Vec<String> = rest.iter().map(|token| token.to_string()).collect();

        match first {
            "exit" | "quit" if rest.is_empty() => Input::Exit,
            "help" => Input::Help,
            "load" => Input::Load(rest.into_iter().next()),
            _ if registry.has_module(first) => {
                let mut rest = rest.into_iter();
                Input::Module {
                    module: first.to_string(),
                    command: rest.next(),
                    args: rest.collect(),
                }
            }
            _ => match &self.current_module {
                Some(module) => Input::Contextual {
                    module: module.clone(),
                    command: first.to_string(),
                    args: rest,
                },
                None => Input::Native {
                    command: first.to_string(),
                    args: rest,
                },
            },
        }
    }
}

/// One classified REPL line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Empty,
    Exit,
    Help,
    Load(Option<String>),
    /// `<module> <command> [args...]`, valid in any context.
    Module {
        module: String,
        command: Option<String>,
        args: Vec<String>,
    },
    /// Bare `<command> [args...]` resolved against the loaded module.
    Contextual {
        module: String,
        command: String,
        args: Vec<String>,
    },
    Native {
        command: String,
        args: Vec<String>,
    },
}
