//! tablegrid - editable, virtualized spreadsheet-style data grid
//!
//! This crate provides the grid core (selection, pooled cell editors, edit
//! state machine, virtualized layout) behind the [`table::TableModel`]
//! boundary, driven through an Elm-style message/update loop.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod grid;
pub mod messages;
pub mod table;
pub mod theme;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::GridConfig;
pub use grid::{DataGrid, FrameContext, GridStyle, RenderedRegion};
pub use messages::{GridEvent, GridMsg};
pub use table::{MemoryTable, TableModel};
pub use theme::GridTheme;
