//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

/// Commands returned by update functions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Cmd {
    /// No command
    #[default]
    None,
    /// Request a redraw
    Redraw,
}

impl Cmd {
    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        matches!(self, Cmd::Redraw)
    }
}
