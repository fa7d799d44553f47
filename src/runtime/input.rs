//! Keyboard input mapping
//!
//! Translates winit keys into grid messages. Shortcuts that act on the host
//! itself (paste, rebind, quit) are resolved first into a [`HostAction`].

use winit::keyboard::{Key, NamedKey};

use tablegrid::GridMsg;

/// Shortcuts handled by the host rather than the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostAction {
    Paste,
    Rebind,
    Exit,
}

/// Resolve host shortcuts. `command` is Ctrl, or Cmd on macOS.
pub fn host_action(key: &Key, command: bool) -> Option<HostAction> {
    match key {
        Key::Named(NamedKey::Escape) => Some(HostAction::Exit),
        Key::Named(NamedKey::Paste) => Some(HostAction::Paste),
        Key::Character(c) if command && c.eq_ignore_ascii_case("v") => Some(HostAction::Paste),
        Key::Character(c) if command && c.eq_ignore_ascii_case("r") => Some(HostAction::Rebind),
        _ => None,
    }
}

/// Map a pressed key to a grid message.
///
/// `text` is the text the key produced, if any. Keys pressed with the
/// command modifier never insert text. Command+Down appends a row and
/// Command+Right a column.
pub fn key_to_msg(key: &Key, text: Option<&str>, command: bool) -> Option<GridMsg> {
    match key {
        Key::Named(NamedKey::ArrowDown) if command => Some(GridMsg::AddRow),
        Key::Named(NamedKey::ArrowRight) if command => Some(GridMsg::AddColumn),
        Key::Named(NamedKey::Enter) => Some(GridMsg::Submit),
        Key::Named(NamedKey::Backspace) => Some(GridMsg::DeleteBackward),
        Key::Named(NamedKey::Delete) => Some(GridMsg::DeleteForward),
        Key::Named(NamedKey::ArrowLeft) => Some(GridMsg::CursorLeft),
        Key::Named(NamedKey::ArrowRight) => Some(GridMsg::CursorRight),
        Key::Named(NamedKey::Home) => Some(GridMsg::CursorHome),
        Key::Named(NamedKey::End) => Some(GridMsg::CursorEnd),
        _ if command => None,
        _ => text
            .filter(|t| !t.is_empty() && !t.chars().any(char::is_control))
            .map(|t| GridMsg::InsertText(t.to_string())),
    }
}

/// Clipboard text reduced to a single line
pub fn paste_text(clipboard: &str) -> String {
    clipboard
        .chars()
        .filter(|c| *c != '\n' && *c != '\r')
        .collect()
}
