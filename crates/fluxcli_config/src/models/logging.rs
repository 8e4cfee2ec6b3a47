use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LoggingConfig {
    /// Explicit `EnvFilter` directive, e.g. `fluxcli=info`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,

    #[serde(default)]
    pub debug: bool,

    #[serde(default = "default_use_color")]
    pub use_color: bool,
}

fn default_use_color() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: None,
            debug: false,
            use_color: true,
        }
    }
}
