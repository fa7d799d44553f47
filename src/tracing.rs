//! Debug tracing infrastructure for development diagnostics
//!
//! Provides structured logging with scoped filtering for debugging
//! selection and edit-state transitions.
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=grid_state=trace` - every selection / edit transition
//! - `RUST_LOG=tablegrid::grid=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/tablegrid/logs/tablegrid.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::grid::{DataGrid, EditTarget};
use crate::table::TableModel;

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG (default `warn`). File logging writes to
/// `~/.config/tablegrid/logs/tablegrid.log` with daily rotation.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // Console layer - respects RUST_LOG
    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "tablegrid.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of selection / edit state for diffing
#[derive(Debug, Clone, PartialEq)]
pub struct GridSnapshot {
    pub selected_row: Option<usize>,
    pub selected_col: Option<usize>,
    pub edit_target: EditTarget,
    pub pooled_editors: usize,
    pub generation: u64,
    pub scroll: (f32, f32),
}

impl GridSnapshot {
    pub fn capture<T: TableModel>(grid: &DataGrid<T>) -> Self {
        let viewport = grid.viewport();
        Self {
            selected_row: grid.selection().row(),
            selected_col: grid.selection().col(),
            edit_target: grid.edit_target(),
            pooled_editors: grid.state().pool().len(),
            generation: grid.state().pool().generation(),
            scroll: (viewport.scroll_x, viewport.scroll_y),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &GridSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if (self.selected_row, self.selected_col) != (other.selected_row, other.selected_col) {
            changes.push(format!(
                "selection: {} → {}",
                describe_selection(self.selected_row, self.selected_col),
                describe_selection(other.selected_row, other.selected_col)
            ));
        }
        if self.edit_target != other.edit_target {
            changes.push(format!(
                "edit: {:?} → {:?}",
                self.edit_target, other.edit_target
            ));
        }
        if self.generation != other.generation {
            changes.push(format!(
                "pool reset: generation {} → {}",
                self.generation, other.generation
            ));
        } else if self.pooled_editors != other.pooled_editors {
            changes.push(format!(
                "pooled editors: {} → {}",
                self.pooled_editors, other.pooled_editors
            ));
        }
        if self.scroll != other.scroll {
            changes.push(format!(
                "scroll: ({:.0},{:.0}) → ({:.0},{:.0})",
                self.scroll.0, self.scroll.1, other.scroll.0, other.scroll.1
            ));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

fn describe_selection(row: Option<usize>, col: Option<usize>) -> String {
    let part = |v: Option<usize>| v.map_or_else(|| "-".to_string(), |v| v.to_string());
    format!("({},{})", part(row), part(col))
}
