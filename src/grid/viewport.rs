//! Scroll offsets shared by the frozen headers and the body
//!
//! The column header scrolls horizontally with the body and the row header
//! scrolls vertically with it. Both read the same offset, so they cannot
//! drift apart.

use std::ops::Range;

use super::layout::GridMetrics;

/// Scroll position of the body in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GridViewport {
    pub scroll_x: f32,
    pub scroll_y: f32,
}

impl GridViewport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the top-left corner
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Largest valid `(scroll_x, scroll_y)`
    pub fn max_scroll(metrics: &GridMetrics) -> (f32, f32) {
        let body = metrics.body_rect();
        (
            (metrics.content_width() - body.width).max(0.0),
            (metrics.content_height() - body.height).max(0.0),
        )
    }

    pub fn clamp(&mut self, metrics: &GridMetrics) {
        let (max_x, max_y) = Self::max_scroll(metrics);
        self.scroll_x = self.scroll_x.clamp(0.0, max_x);
        self.scroll_y = self.scroll_y.clamp(0.0, max_y);
    }

    pub fn scroll_by(&mut self, dx: f32, dy: f32, metrics: &GridMetrics) {
        self.scroll_x += dx;
        self.scroll_y += dy;
        self.clamp(metrics);
    }

    pub fn scroll_to(&mut self, x: f32, y: f32, metrics: &GridMetrics) {
        self.scroll_x = x;
        self.scroll_y = y;
        self.clamp(metrics);
    }

    /// Rows intersecting the body area
    pub fn visible_rows(&self, metrics: &GridMetrics) -> Range<usize> {
        visible_range(
            self.scroll_y,
            metrics.body_rect().height,
            metrics.cell_height,
            metrics.rows,
        )
    }

    /// Columns intersecting the body area
    pub fn visible_cols(&self, metrics: &GridMetrics) -> Range<usize> {
        visible_range(
            self.scroll_x,
            metrics.body_rect().width,
            metrics.cell_width,
            metrics.cols,
        )
    }

    /// Scroll the minimum amount needed to show the whole cell
    pub fn ensure_visible(&mut self, row: usize, col: usize, metrics: &GridMetrics) {
        let body = metrics.body_rect();
        self.scroll_x = reveal(
            self.scroll_x,
            col as f32 * metrics.cell_width,
            metrics.cell_width,
            body.width,
        );
        self.scroll_y = reveal(
            self.scroll_y,
            row as f32 * metrics.cell_height,
            metrics.cell_height,
            body.height,
        );
        self.clamp(metrics);
    }
}

fn visible_range(scroll: f32, extent: f32, cell: f32, count: usize) -> Range<usize> {
    if count == 0 || cell <= 0.0 || extent <= 0.0 {
        return 0..0;
    }
    let start = ((scroll / cell).floor().max(0.0) as usize).min(count);
    let end = (((scroll + extent) / cell).ceil().max(0.0) as usize).min(count);
    start..end.max(start)
}

fn reveal(scroll: f32, start: f32, size: f32, extent: f32) -> f32 {
    let end = start + size;
    if start < scroll || extent <= size {
        start
    } else if end > scroll + extent {
        end - extent
    } else {
        scroll
    }
}
