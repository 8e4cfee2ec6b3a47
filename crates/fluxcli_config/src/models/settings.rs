use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;

pub const DEFAULT_PROMPT: &str = "[ fluxcli ] > ";

/// Per-user key-value settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct UserSettings {
    #[serde(default = "default_prompt")]
    pub prompt: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modules_dir: Option<PathBuf>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_commands: Option<PathBuf>,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_prompt() -> String {
    DEFAULT_PROMPT.to_string()
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            prompt: default_prompt(),
            modules_dir: None,
            native_commands: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl UserSettings {
    pub fn uses_default_prompt(&self) -> bool {
        self.prompt == DEFAULT_PROMPT
    }
}
