use std::{
    collections::BTreeMap,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument, warn};

use crate::{
    error::ConfigError,
    models::{descriptor::CommandSpec, descriptor::DescriptorFile, settings::UserSettings},
};

/// Reads the declared commands of a descriptor file.
///
/// A missing file is an empty mapping; a file that exists but does not parse
/// is an error.
#[instrument(skip(path), fields(path = %path.display()), name = "loader: load_descriptor")]
pub fn load_descriptor(path: &Path) -> Result<BTreeMap<String, CommandSpec>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("No descriptor file, treating as empty");
            return Ok(BTreeMap::new());
        }
        Err(e) => return Err(ConfigError::io(path, e)),
    };

    if content.trim().is_empty() {
        debug!("Descriptor file is empty");
        return Ok(BTreeMap::new());
    }

    let file: Option<DescriptorFile> =
        serde_yml::from_str(&content).map_err(|source| ConfigError::DescriptorParse {
            path: path.to_path_buf(),
            source,
        })?;

    let commands = file.map(DescriptorFile::into_commands).unwrap_or_default();
    debug!(commands = commands.len(), "Descriptor loaded");
    Ok(commands)
}

/// Location of the per-user settings file.
///
/// `%APPDATA%\FluxCLI\fluxcli.yaml` on Windows, `~/.fluxcli/fluxcli.yaml`
/// elsewhere.
pub fn default_settings_path() -> Option<PathBuf> {
    if cfg!(target_os = "windows") {
        dirs::config_dir()
            .or_else(dirs::home_dir)
            .map(|dir| dir.join("FluxCLI").join("fluxcli.yaml"))
    } else {
        dirs::home_dir().map(|dir| dir.join(".fluxcli").join("fluxcli.yaml"))
    }
}

/// Loads user settings, falling back to defaults on any problem.
pub fn load_settings(path: &Path) -> UserSettings {
    try_load_settings(path).unwrap_or_else(|e| {
        warn!(
            error = &e as &dyn std::error::Error,
            "Failed to read settings, using defaults"
        );
        UserSettings::default()
    })
}

/// Loads user settings. A missing or empty file yields the defaults.
pub fn try_load_settings(path: &Path) -> Result<UserSettings, ConfigError> {
    Ok(read_settings(path)?.unwrap_or_default())
}

fn read_settings(path: &Path) -> Result<Option<UserSettings>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "No settings file yet");
            return Ok(None);
        }
        Err(e) => return Err(ConfigError::io(path, e)),
    };

    if content.trim().is_empty() {
        return Ok(None);
    }

    serde_yml::from_str(&content).map_err(|source| ConfigError::SettingsParse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn save_settings(path: &Path, settings: &UserSettings) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
        }
    }

    let content = serde_yml::to_string(settings).map_err(ConfigError::SettingsSerialize)?;
    fs::write(path, content).map_err(|e| ConfigError::io(path, e))?;
    debug!(path = %path.display(), "Settings saved");
    Ok(())
}
