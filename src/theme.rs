//! Grid color themes
//!
//! Provides YAML-based theming with compile-time embedded themes and
//! user-defined themes from the config directory.
//!
//! Theme loading priority:
//! 1. User config: `~/.config/tablegrid/themes/{id}.yaml`
//! 2. Embedded: Built-in themes compiled into binary

use std::path::Path;

use serde::Deserialize;

// Embed theme YAML files at compile time
pub const LIGHT_YAML: &str = include_str!("../themes/light.yaml");
pub const DARK_YAML: &str = include_str!("../themes/dark.yaml");

/// A built-in theme entry
pub struct BuiltinTheme {
    /// Stable identifier for config (e.g. "light", "dark")
    pub id: &'static str,
    /// Embedded YAML content
    pub yaml: &'static str,
}

/// Registry of all built-in themes
pub const BUILTIN_THEMES: &[BuiltinTheme] = &[
    BuiltinTheme {
        id: "light",
        yaml: LIGHT_YAML,
    },
    BuiltinTheme {
        id: "dark",
        yaml: DARK_YAML,
    },
];

/// Load a theme from a YAML file
pub fn from_file(path: &Path) -> Result<GridTheme, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read theme file {}: {}", path.display(), e))?;
    GridTheme::from_yaml(&content)
}

/// Load theme by id with priority: user → builtin
pub fn load_theme(id: &str) -> Result<GridTheme, String> {
    if let Some(user_path) = crate::config_paths::theme_file(id) {
        if user_path.exists() {
            tracing::info!("Loading user theme from {}", user_path.display());
            return from_file(&user_path);
        }
    }

    tracing::info!("Loading builtin theme: {}", id);
    GridTheme::from_builtin(id)
}

/// Like [`load_theme`], falling back to the light theme with a warning
pub fn load_theme_or_default(id: &str) -> GridTheme {
    load_theme(id).unwrap_or_else(|e| {
        tracing::warn!("Failed to load theme '{}': {}, using light theme", id, e);
        GridTheme::light()
    })
}

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color from RGBA values
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Convert to ARGB u32 for softbuffer
    pub fn to_argb_u32(&self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    /// Parse from "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let hex = s.trim_start_matches('#');
        let channel = |range: std::ops::Range<usize>| {
            hex.get(range)
                .ok_or_else(|| format!("Invalid color format: {}", s))
                .and_then(|part| u8::from_str_radix(part, 16).map_err(|e| e.to_string()))
        };
        match hex.len() {
            6 => Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Color::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }
}

/// Raw theme data as parsed from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeData {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub ui: UiThemeData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiThemeData {
    pub background: String,
    pub grid_line: String,
    pub cell: CellThemeData,
    pub selection: SelectionThemeData,
    pub header: HeaderThemeData,
    pub editor: EditorThemeData,
    pub summary_bar: SummaryBarThemeData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CellThemeData {
    pub background: String,
    pub foreground: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectionThemeData {
    pub row: String,
    pub column: String,
    pub cell: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HeaderThemeData {
    pub background: String,
    pub highlight: String,
    pub corner_background: String,
    pub corner_foreground: String,
    pub label_background: String,
    pub label_foreground: String,
    pub name_background: String,
    pub name_foreground: String,
    pub row_number_background: String,
    pub row_number_foreground: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EditorThemeData {
    pub cell_background: String,
    pub cell_border: String,
    pub name_background: String,
    pub name_border: String,
    pub foreground: String,
    #[serde(default)]
    pub caret: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummaryBarThemeData {
    pub background: String,
    pub foreground: String,
}

/// Resolved grid theme
#[derive(Debug, Clone, PartialEq)]
pub struct GridTheme {
    pub name: String,
    pub background: Color,
    pub grid_line: Color,
    pub cell: CellTheme,
    pub selection: SelectionTheme,
    pub header: HeaderTheme,
    pub editor: EditorTheme,
    pub summary_bar: SummaryBarTheme,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CellTheme {
    pub background: Color,
    pub foreground: Color,
}

/// Body cell backgrounds by highlight class
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionTheme {
    pub row: Color,
    pub column: Color,
    pub cell: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderTheme {
    pub background: Color,
    /// Label/name background of the selected row or column
    pub highlight: Color,
    pub corner_background: Color,
    pub corner_foreground: Color,
    pub label_background: Color,
    pub label_foreground: Color,
    pub name_background: Color,
    pub name_foreground: Color,
    pub row_number_background: Color,
    pub row_number_foreground: Color,
}

/// Colors of the active edit target
#[derive(Debug, Clone, PartialEq)]
pub struct EditorTheme {
    pub cell_background: Color,
    pub cell_border: Color,
    pub name_background: Color,
    pub name_border: Color,
    pub foreground: Color,
    pub caret: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryBarTheme {
    pub background: Color,
    pub foreground: Color,
}

impl GridTheme {
    /// Load theme from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let data: ThemeData =
            serde_yaml::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))?;
        Self::from_data(data)
    }

    /// Load a built-in theme by id
    pub fn from_builtin(id: &str) -> Result<Self, String> {
        let entry = BUILTIN_THEMES
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| format!("Unknown theme id: {}", id))?;
        GridTheme::from_yaml(entry.yaml)
    }

    /// Convert raw theme data to resolved theme
    pub fn from_data(data: ThemeData) -> Result<Self, String> {
        let ui = data.ui;
        let editor_foreground = Color::from_hex(&ui.editor.foreground)?;

        Ok(GridTheme {
            name: data.name,
            background: Color::from_hex(&ui.background)?,
            grid_line: Color::from_hex(&ui.grid_line)?,
            cell: CellTheme {
                background: Color::from_hex(&ui.cell.background)?,
                foreground: Color::from_hex(&ui.cell.foreground)?,
            },
            selection: SelectionTheme {
                row: Color::from_hex(&ui.selection.row)?,
                column: Color::from_hex(&ui.selection.column)?,
                cell: Color::from_hex(&ui.selection.cell)?,
            },
            header: HeaderTheme {
                background: Color::from_hex(&ui.header.background)?,
                highlight: Color::from_hex(&ui.header.highlight)?,
                corner_background: Color::from_hex(&ui.header.corner_background)?,
                corner_foreground: Color::from_hex(&ui.header.corner_foreground)?,
                label_background: Color::from_hex(&ui.header.label_background)?,
                label_foreground: Color::from_hex(&ui.header.label_foreground)?,
                name_background: Color::from_hex(&ui.header.name_background)?,
                name_foreground: Color::from_hex(&ui.header.name_foreground)?,
                row_number_background: Color::from_hex(&ui.header.row_number_background)?,
                row_number_foreground: Color::from_hex(&ui.header.row_number_foreground)?,
            },
            editor: EditorTheme {
                cell_background: Color::from_hex(&ui.editor.cell_background)?,
                cell_border: Color::from_hex(&ui.editor.cell_border)?,
                name_background: Color::from_hex(&ui.editor.name_background)?,
                name_border: Color::from_hex(&ui.editor.name_border)?,
                foreground: editor_foreground,
                caret: ui
                    .editor
                    .caret
                    .as_deref()
                    .map(Color::from_hex)
                    .transpose()?
                    .unwrap_or(editor_foreground),
            },
            summary_bar: SummaryBarTheme {
                background: Color::from_hex(&ui.summary_bar.background)?,
                foreground: Color::from_hex(&ui.summary_bar.foreground)?,
            },
        })
    }

    /// Built-in light theme
    pub fn light() -> Self {
        match GridTheme::from_yaml(LIGHT_YAML) {
            Ok(theme) => theme,
            Err(_) => {
                // Hardcoded fallback if YAML parsing fails
                GridTheme {
                    name: "Light".to_string(),
                    background: Color::rgb(255, 255, 255),
                    grid_line: Color::rgb(225, 228, 232),
                    cell: CellTheme {
                        background: Color::rgb(255, 255, 255),
                        foreground: Color::rgb(0, 0, 0),
                    },
                    selection: SelectionTheme {
                        row: Color::rgb(235, 250, 235),
                        column: Color::rgb(235, 250, 235),
                        cell: Color::rgb(220, 200, 250),
                    },
                    header: HeaderTheme {
                        background: Color::rgb(245, 246, 250),
                        highlight: Color::rgb(200, 240, 200),
                        corner_background: Color::rgb(240, 240, 240),
                        corner_foreground: Color::rgb(80, 80, 80),
                        label_background: Color::rgb(230, 220, 255),
                        label_foreground: Color::rgb(0, 90, 180),
                        name_background: Color::rgb(225, 235, 250),
                        name_foreground: Color::rgb(0, 0, 0),
                        row_number_background: Color::rgb(230, 220, 255),
                        row_number_foreground: Color::rgb(100, 100, 100),
                    },
                    editor: EditorTheme {
                        cell_background: Color::rgb(245, 240, 255),
                        cell_border: Color::rgb(150, 120, 200),
                        name_background: Color::rgb(240, 250, 255),
                        name_border: Color::rgb(100, 150, 240),
                        foreground: Color::rgb(0, 0, 0),
                        caret: Color::rgb(0, 0, 0),
                    },
                    summary_bar: SummaryBarTheme {
                        background: Color::rgb(245, 246, 250),
                        foreground: Color::rgb(51, 51, 51),
                    },
                }
            }
        }
    }
}

impl Default for GridTheme {
    fn default() -> Self {
        Self::light()
    }
}
