use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed descriptor '{}'", path.display())]
    DescriptorParse {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },

    #[error("malformed settings file '{}'", path.display())]
    SettingsParse {
        path: PathBuf,
        #[source]
        source: serde_yml::Error,
    },

    #[error("failed to serialize settings")]
    SettingsSerialize(#[source] serde_yml::Error),

    #[error("I/O error on '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            source,
        }
    }
}
