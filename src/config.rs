//! Grid configuration persistence
//!
//! Stores user preferences in `~/.config/tablegrid/config.yaml`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Smallest accepted cell edge in logical units
pub const MIN_CELL_SIZE: f32 = 16.0;

/// Grid configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Selected theme id (e.g., "light", "dark")
    pub theme: String,
    /// Cell width in logical units
    pub cell_width: f32,
    /// Cell height in logical units
    pub cell_height: f32,
    /// Font size in logical points
    pub font_size: f32,
    /// TrueType/OpenType font; system fonts are searched when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,
    /// Text shown in the top-left corner
    pub corner_label: String,
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            theme: "light".to_string(),
            cell_width: 80.0,
            cell_height: 32.0,
            font_size: 14.0,
            font_path: None,
            corner_label: crate::grid::DEFAULT_CORNER_LABEL.to_string(),
            window_width: 1024,
            window_height: 720,
        }
    }
}

impl GridConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from `path`, falling back to defaults on any error
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<GridConfig>(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config.sanitized()
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Update theme and save
    pub fn set_theme(&mut self, theme_id: &str) -> Result<(), String> {
        self.theme = theme_id.to_string();
        self.save()
    }

    /// Clamp sizes into usable ranges
    pub fn sanitized(mut self) -> Self {
        if self.cell_width.is_nan() || self.cell_width < MIN_CELL_SIZE {
            tracing::warn!("cell_width {} too small, using {}", self.cell_width, MIN_CELL_SIZE);
            self.cell_width = MIN_CELL_SIZE;
        }
        if self.cell_height.is_nan() || self.cell_height < MIN_CELL_SIZE {
            tracing::warn!("cell_height {} too small, using {}", self.cell_height, MIN_CELL_SIZE);
            self.cell_height = MIN_CELL_SIZE;
        }
        if self.font_size.is_nan() || self.font_size <= 0.0 {
            self.font_size = Self::default().font_size;
        }
        self
    }
}
