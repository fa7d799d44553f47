//! Where tablegrid keeps its files
//!
//! ```text
//! <config dir>/             $XDG_CONFIG_HOME/tablegrid, ~/.config/tablegrid
//! │                         or %APPDATA%\tablegrid on Windows
//! ├── config.yaml           GridConfig
//! ├── themes/<id>.yaml      user themes, checked before the built-ins
//! └── logs/tablegrid.log.*  daily rolling debug log
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "tablegrid";

/// Entries inside the config directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigEntry {
    ConfigFile,
    ThemesDir,
    LogsDir,
}

impl ConfigEntry {
    fn relative(self) -> &'static str {
        match self {
            ConfigEntry::ConfigFile => "config.yaml",
            ConfigEntry::ThemesDir => "themes",
            ConfigEntry::LogsDir => "logs",
        }
    }

    /// Absolute path of this entry, if a config directory can be resolved
    pub fn path(self) -> Option<PathBuf> {
        config_dir().map(|dir| dir.join(self.relative()))
    }
}

/// Base directory for every file tablegrid reads or writes
pub fn config_dir() -> Option<PathBuf> {
    let base = if cfg!(target_os = "windows") {
        std::env::var_os("APPDATA").map(PathBuf::from)
    } else {
        std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .filter(|p| p.is_absolute())
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
    };
    base.map(|dir| dir.join(APP_DIR))
}

pub fn config_file() -> Option<PathBuf> {
    ConfigEntry::ConfigFile.path()
}

pub fn themes_dir() -> Option<PathBuf> {
    ConfigEntry::ThemesDir.path()
}

pub fn logs_dir() -> Option<PathBuf> {
    ConfigEntry::LogsDir.path()
}

/// User theme file for `id` (`themes/<id>.yaml`)
pub fn theme_file(id: &str) -> Option<PathBuf> {
    themes_dir().map(|dir| dir.join(format!("{}.yaml", id)))
}

/// Create the directory `entry` names (or, for a file, its parent) and return it
pub fn ensure(entry: ConfigEntry) -> Result<PathBuf, String> {
    let path = entry
        .path()
        .ok_or_else(|| "No config directory available".to_string())?;
    let dir = match entry {
        ConfigEntry::ConfigFile => path.parent().map(PathBuf::from).unwrap_or_default(),
        ConfigEntry::ThemesDir | ConfigEntry::LogsDir => path,
    };
    std::fs::create_dir_all(&dir)
        .map_err(|e| format!("Failed to create directory {}: {}", dir.display(), e))?;
    Ok(dir)
}

/// Create `logs/`, returning it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    ensure(ConfigEntry::LogsDir)
}
