//! Pooled interactive handles keyed by grid coordinate
//!
//! Each visible cell, column name and row name owns one [`EditBuffer`] and
//! one [`ClickDetector`]. They are created the first time the coordinate is
//! touched and live until the pool is reset. Keys are only meaningful for
//! the table they were created against, so the pool must be emptied whenever
//! the bound table is replaced.

use std::collections::HashMap;

/// Identity of a pooled widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKey {
    Cell { row: usize, col: usize },
    ColumnName(usize),
    RowName(usize),
}

/// Single-line text under edit. The cursor is a char index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    text: String,
    cursor: usize,
}

impl EditBuffer {
    /// Create a buffer with the cursor at the end of `text`
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self { text, cursor }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Text before the cursor
    pub fn before_cursor(&self) -> &str {
        &self.text[..self.byte_offset(self.cursor)]
    }

    /// Replace the content and move the cursor to the end
    pub fn set_text(&mut self, text: &str) {
        self.text.clear();
        self.text.push_str(text);
        self.cursor = self.char_len();
    }

    pub fn insert_char(&mut self, ch: char) {
        let at = self.byte_offset(self.cursor);
        self.text.insert(at, ch);
        self.cursor += 1;
    }

    pub fn insert_str(&mut self, s: &str) {
        let at = self.byte_offset(self.cursor);
        self.text.insert_str(at, s);
        self.cursor += s.chars().count();
    }

    /// Remove the char before the cursor (backspace)
    pub fn delete_backward(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let start = self.byte_offset(self.cursor - 1);
        let end = self.byte_offset(self.cursor);
        self.text.replace_range(start..end, "");
        self.cursor -= 1;
    }

    /// Remove the char at the cursor (delete)
    pub fn delete_forward(&mut self) {
        if self.cursor >= self.char_len() {
            return;
        }
        let start = self.byte_offset(self.cursor);
        let end = self.byte_offset(self.cursor + 1);
        self.text.replace_range(start..end, "");
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_len());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_len();
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map_or(self.text.len(), |(idx, _)| idx)
    }
}

/// Latches clicks between the input pass and the interaction pass of a frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClickDetector {
    pending: u32,
}

impl ClickDetector {
    /// Record a click
    pub fn click(&mut self) {
        self.pending = self.pending.saturating_add(1);
    }

    /// Consume one pending click
    pub fn clicked(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }
        self.pending -= 1;
        true
    }

    pub fn has_pending(&self) -> bool {
        self.pending > 0
    }

    /// Forget pending clicks, returning how many there were
    pub fn cancel(&mut self) -> u32 {
        std::mem::take(&mut self.pending)
    }
}

/// Coordinate-keyed arena of edit buffers and click detectors.
#[derive(Debug, Default)]
pub struct WidgetPool {
    editors: HashMap<WidgetKey, EditBuffer>,
    clickers: HashMap<WidgetKey, ClickDetector>,
    generation: u64,
}

impl WidgetPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Existing editor for `key`, or a new one seeded by `seed`
    pub fn editor(&mut self, key: WidgetKey, seed: impl FnOnce() -> String) -> &mut EditBuffer {
        self.editors
            .entry(key)
            .or_insert_with(|| EditBuffer::new(seed()))
    }

    /// Existing click detector for `key`, or a new idle one
    pub fn clicker(&mut self, key: WidgetKey) -> &mut ClickDetector {
        self.clickers.entry(key).or_default()
    }

    pub fn cell_editor(
        &mut self,
        row: usize,
        col: usize,
        seed: impl FnOnce() -> String,
    ) -> &mut EditBuffer {
        self.editor(WidgetKey::Cell { row, col }, seed)
    }

    pub fn cell_clicker(&mut self, row: usize, col: usize) -> &mut ClickDetector {
        self.clicker(WidgetKey::Cell { row, col })
    }

    pub fn column_name_editor(
        &mut self,
        col: usize,
        seed: impl FnOnce() -> String,
    ) -> &mut EditBuffer {
        self.editor(WidgetKey::ColumnName(col), seed)
    }

    pub fn column_name_clicker(&mut self, col: usize) -> &mut ClickDetector {
        self.clicker(WidgetKey::ColumnName(col))
    }

    pub fn row_name_editor(&mut self, row: usize, seed: impl FnOnce() -> String) -> &mut EditBuffer {
        self.editor(WidgetKey::RowName(row), seed)
    }

    pub fn row_name_clicker(&mut self, row: usize) -> &mut ClickDetector {
        self.clicker(WidgetKey::RowName(row))
    }

    /// Read-only lookup that never creates an entry
    pub fn get_editor(&self, key: WidgetKey) -> Option<&EditBuffer> {
        self.editors.get(&key)
    }

    pub(crate) fn get_editor_mut(&mut self, key: WidgetKey) -> Option<&mut EditBuffer> {
        self.editors.get_mut(&key)
    }

    /// Drop clicks that no widget consumed this frame.
    ///
    /// A click belongs to the frame it arrived in; one left on a widget that
    /// scrolled out of view must not fire when it scrolls back.
    pub fn cancel_pending_clicks(&mut self) -> u32 {
        self.clickers.values_mut().map(ClickDetector::cancel).sum()
    }

    /// Number of pooled editors
    pub fn len(&self) -> usize {
        self.editors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.editors.is_empty() && self.clickers.is_empty()
    }

    /// Incremented on every [`WidgetPool::reset`]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Evict every pooled widget.
    ///
    /// Only reachable through `GridState`, which clears the edit target in
    /// the same step.
    pub(crate) fn reset(&mut self) {
        let evicted = self.editors.len().max(self.clickers.len());
        self.editors.clear();
        self.clickers.clear();
        self.generation += 1;
        tracing::debug!(
            "Widget pool reset: evicted {} widgets, generation {}",
            evicted,
            self.generation
        );
    }
}
