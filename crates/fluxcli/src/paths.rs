//! Location of the modules root and the native descriptor.

use std::path::{Path, PathBuf};

use fluxcli_config::UserSettings;
use tracing::debug;

use crate::{DEFAULT_MODULES_DIR, DEFAULT_NATIVE_DESCRIPTOR};

/// Host paths after applying command line, settings and built-in defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostPaths {
    pub modules_dir: PathBuf,
    pub native_commands: PathBuf,
}

impl HostPaths {
    /// Command line (flag or env var) wins over settings, settings win over
    /// the built-in defaults. Defaults are looked up next to `install_dir`
    /// first and relative to the working directory otherwise.
    pub fn resolve(
        modules_dir: Option<PathBuf>,
        native_commands: Option<PathBuf>,
        settings: &UserSettings,
        install_dir: Option<&Path>,
    ) -> Self {
        let modules_dir = modules_dir
            .or_else(|| settings.modules_dir.clone())
            .unwrap_or_else(|| builtin(DEFAULT_MODULES_DIR, install_dir));
        let native_commands = native_commands
            .or_else(|| settings.native_commands.clone())
            .unwrap_or_else(|| builtin(DEFAULT_NATIVE_DESCRIPTOR, install_dir));

        Self {
            modules_dir,
            native_commands,
        }
    }
}

/// Directory holding the running executable.
pub fn install_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
}

fn builtin(relative: &str, install_dir: Option<&Path>) -> PathBuf {
    if let Some(dir) = install_dir {
        let candidate = dir.join(relative);
        if candidate.exists() {
            return candidate;
        }
        debug!(
            "Trying path relative to working directory: {} not found",
            candidate.display()
        );
    }
    PathBuf::from(relative)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_command_line_wins() {
        let settings = UserSettings {
            modules_dir: Some(PathBuf::from("/from/settings/modules")),
            native_commands: Some(PathBuf::from("/from/settings/commands.yaml")),
            ..Default::default()
        };

        let paths = HostPaths::resolve(
            Some(PathBuf::from("/from/cli/modules")),
            Some(PathBuf::from("/from/cli/commands.yaml")),
            &settings,
            None,
        );
        assert_eq!(paths.modules_dir, PathBuf::from("/from/cli/modules"));
        assert_eq!(paths.native_commands, PathBuf::from("/from/cli/commands.yaml"));
    }

    #[test]
    fn test_settings_win_over_defaults() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join(DEFAULT_MODULES_DIR)).unwrap();

        let settings = UserSettings {
            modules_dir: Some(PathBuf::from("/from/settings/modules")),
            ..Default::default()
        };

        let paths = HostPaths::resolve(None, None, &settings, Some(temp_dir.path()));
        assert_eq!(paths.modules_dir, PathBuf::from("/from/settings/modules"));
        assert_eq!(paths.native_commands, PathBuf::from(DEFAULT_NATIVE_DESCRIPTOR));
    }

    #[test]
    fn test_defaults_next_to_executable() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir_all(temp_dir.path().join(DEFAULT_MODULES_DIR)).unwrap();
        fs::create_dir_all(temp_dir.path().join("config")).unwrap();
        fs::write(temp_dir.path().join(DEFAULT_NATIVE_DESCRIPTOR), "commands: {}\n").unwrap();

        let paths = HostPaths::resolve(None, None, &UserSettings::default(), Some(temp_dir.path()));
        assert_eq!(paths.modules_dir, temp_dir.path().join(DEFAULT_MODULES_DIR));
        assert_eq!(
            paths.native_commands,
            temp_dir.path().join(DEFAULT_NATIVE_DESCRIPTOR)
        );
    }

    #[test]
    fn test_defaults_fall_back_to_working_directory() {
        let temp_dir = TempDir::new().unwrap();

        let paths = HostPaths::resolve(None, None, &UserSettings::default(), Some(temp_dir.path()));
        assert_eq!(paths.modules_dir, PathBuf::from(DEFAULT_MODULES_DIR));
        assert_eq!(paths.native_commands, PathBuf::from(DEFAULT_NATIVE_DESCRIPTOR));

        let paths = HostPaths::resolve(None, None, &UserSettings::default(), None);
        assert_eq!(paths.modules_dir, PathBuf::from(DEFAULT_MODULES_DIR));
    }
}
