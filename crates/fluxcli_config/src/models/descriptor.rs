use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// On-disk shape of a descriptor file.
///
/// Both the `commands` map and individual entries may be left empty in YAML
/// (`ping:` with no body), so both are parsed as optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct DescriptorFile {
    #[serde(default)]
    pub commands: Option<BTreeMap<String, Option<CommandSpec>>>,
}

impl DescriptorFile {
    pub fn into_commands(self) -> BTreeMap<String, CommandSpec> {
        self.commands
            .unwrap_or_default()
            .into_iter()
            .map(|(name, spec)| (name, spec.unwrap_or_default()))
            .collect()
    }
}

/// Declarative metadata for a single command.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct CommandSpec {
    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<ArgSpec>,
}

impl CommandSpec {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            ..Default::default()
        }
    }

    /// `args` extended with the declared defaults of the positions it leaves
    /// out. Filling stops at the first omitted argument without a default.
    pub fn with_defaults(&self, args: &[String]) -> Vec<String> {
        let mut filled = args.to_vec();
        for spec in self.args.iter().skip(args.len()) {
            match &spec.default {
                Some(default) => filled.push(default.clone()),
                None => break,
            }
        }
        filled
    }

    /// Usage line for `name`, derived from `args` when no explicit usage is
    /// declared.
    pub fn usage_line(&self, name: &str) -> String {
        if let Some(usage) = &self.usage {
            return usage.clone();
        }

        let mut line = name.to_string();
        for arg in &self.args {
            if arg.required {
                line.push_str(&format!(" <{}>", arg.name));
            } else {
                line.push_str(&format!(" [{}]", arg.name));
            }
        }
        line
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ArgSpec {
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default = "default_required")]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

fn default_required() -> bool {
    true
}

/// Declared commands of one module, keyed by command name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleDescriptor {
    pub name: String,
    pub commands: BTreeMap<String, CommandSpec>,
}

impl ModuleDescriptor {
    pub fn new(name: impl Into<String>, commands: BTreeMap<String, CommandSpec>) -> Self {
        Self {
            name: name.into(),
            commands,
        }
    }
}
