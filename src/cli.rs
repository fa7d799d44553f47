//! Command-line argument parsing for the grid host
//!
//! Supports:
//! - Alternate config file
//! - Blank table of a given size instead of the sample data
//! - Per-run overrides of cell size, font and theme

use clap::Parser;
use std::path::PathBuf;

use crate::config::GridConfig;
use crate::table::MemoryTable;

pub const DEFAULT_BLANK_ROWS: usize = 100;
pub const DEFAULT_BLANK_COLS: usize = 26;

/// Editable spreadsheet-style data grid
#[derive(Parser, Debug, Default)]
#[command(name = "tablegrid", version, about = "Editable spreadsheet-style data grid")]
pub struct CliArgs {
    /// Read configuration from PATH instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Start with an empty table instead of the sample data
    #[arg(short = 'b', long)]
    pub blank: bool,

    /// Rows of the blank table (implies --blank)
    #[arg(long, value_name = "N")]
    pub rows: Option<usize>,

    /// Columns of the blank table (implies --blank)
    #[arg(long, value_name = "N")]
    pub cols: Option<usize>,

    /// Cell width in logical units
    #[arg(long, value_name = "W")]
    pub cell_width: Option<f32>,

    /// Cell height in logical units
    #[arg(long, value_name = "H")]
    pub cell_height: Option<f32>,

    /// Font file to render text with
    #[arg(long, value_name = "PATH")]
    pub font: Option<PathBuf>,

    /// Theme id (e.g. "light", "dark")
    #[arg(long, value_name = "ID")]
    pub theme: Option<String>,
}

/// Which table the host binds at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupData {
    Sample,
    Blank { rows: usize, cols: usize },
}

impl StartupData {
    pub fn build_table(self) -> MemoryTable {
        match self {
            StartupData::Sample => MemoryTable::sample(),
            StartupData::Blank { rows, cols } => MemoryTable::blank(rows, cols),
        }
    }
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StartupConfig {
    pub data: Option<StartupData>,
    pub config_path: Option<PathBuf>,
    pub cell_width: Option<f32>,
    pub cell_height: Option<f32>,
    pub font_path: Option<PathBuf>,
    pub theme: Option<String>,
}

impl CliArgs {
    /// Validate parsed CLI args into startup configuration
    pub fn into_startup(self) -> Result<StartupConfig, String> {
        if self.rows == Some(0) || self.cols == Some(0) {
            return Err("--rows and --cols must be at least 1".to_string());
        }
        for (flag, value) in [("--cell-width", self.cell_width), ("--cell-height", self.cell_height)] {
            if value.is_some_and(|v| !(v.is_finite() && v > 0.0)) {
                return Err(format!("{} must be a positive number", flag));
            }
        }

        let data = if self.blank || self.rows.is_some() || self.cols.is_some() {
            StartupData::Blank {
                rows: self.rows.unwrap_or(DEFAULT_BLANK_ROWS),
                cols: self.cols.unwrap_or(DEFAULT_BLANK_COLS),
            }
        } else {
            StartupData::Sample
        };

        Ok(StartupConfig {
            data: Some(data),
            config_path: self.config,
            cell_width: self.cell_width,
            cell_height: self.cell_height,
            font_path: self.font,
            theme: self.theme,
        })
    }
}

impl StartupConfig {
    /// Load the config file this run should use
    pub fn load_config(&self) -> GridConfig {
        let mut config = match &self.config_path {
            Some(path) => GridConfig::load_from(path),
            None => GridConfig::load(),
        };
        self.apply_overrides(&mut config);
        config
    }

    /// Apply command-line overrides on top of a loaded config
    pub fn apply_overrides(&self, config: &mut GridConfig) {
        if let Some(width) = self.cell_width {
            config.cell_width = width;
        }
        if let Some(height) = self.cell_height {
            config.cell_height = height;
        }
        if let Some(font) = &self.font_path {
            config.font_path = Some(font.clone());
        }
        if let Some(theme) = &self.theme {
            config.theme = theme.clone();
        }
        *config = std::mem::take(config).sanitized();
    }

    /// Build the initial table
    pub fn build_table(&self) -> MemoryTable {
        self.data.unwrap_or(StartupData::Sample).build_table()
    }
}
