//! Grid geometry and hit testing
//!
//! ```text
//! ┌──────────┬──────────────────────────┐
//! │  Corner  │ Column header (scroll x) │  label row: A B C ...
//! │          │                          │  name row:  editable names
//! ├──────────┼──────────────────────────┤
//! │ Row hdr  │ Body (scroll x + y)      │
//! │ (scroll  │                          │
//! │    y)    │                          │
//! └──────────┴──────────────────────────┘
//! ```
//!
//! The row header is two cells wide (number, name) and the column header is
//! two cells tall (letter label, name).

use super::pool::WidgetKey;
use super::viewport::GridViewport;

/// Axis-aligned rectangle in surface pixels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Shrink by `dx` on the left and right, `dy` on the top and bottom
    pub fn inset(&self, dx: f32, dy: f32) -> Self {
        Self::new(
            self.x + dx,
            self.y + dy,
            (self.width - 2.0 * dx).max(0.0),
            (self.height - 2.0 * dy).max(0.0),
        )
    }
}

/// Cell size in logical (scale-independent) units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub cell_width: f32,
    pub cell_height: f32,
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            cell_width: 80.0,
            cell_height: 32.0,
        }
    }
}

/// Pixel geometry of one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridMetrics {
    pub cell_width: f32,
    pub cell_height: f32,
    pub rows: usize,
    pub cols: usize,
    pub width: f32,
    pub height: f32,
    pub scale: f32,
}

impl GridMetrics {
    pub fn new(
        geometry: &GridGeometry,
        scale: f32,
        (rows, cols): (usize, usize),
        (width, height): (f32, f32),
    ) -> Self {
        Self {
            cell_width: geometry.cell_width * scale,
            cell_height: geometry.cell_height * scale,
            rows,
            cols,
            width: width.max(0.0),
            height: height.max(0.0),
            scale,
        }
    }

    pub fn row_header_width(&self) -> f32 {
        self.cell_width * 2.0
    }

    pub fn column_header_height(&self) -> f32 {
        self.cell_height * 2.0
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    pub fn corner_rect(&self) -> Rect {
        Rect::new(
            0.0,
            0.0,
            self.row_header_width().min(self.width),
            self.column_header_height().min(self.height),
        )
    }

    /// Scrolling part of the column header
    pub fn column_header_rect(&self) -> Rect {
        let x = self.row_header_width();
        Rect::new(
            x,
            0.0,
            (self.width - x).max(0.0),
            self.column_header_height().min(self.height),
        )
    }

    /// Scrolling part of the row header
    pub fn row_header_rect(&self) -> Rect {
        let y = self.column_header_height();
        Rect::new(
            0.0,
            y,
            self.row_header_width().min(self.width),
            (self.height - y).max(0.0),
        )
    }

    pub fn body_rect(&self) -> Rect {
        let x = self.row_header_width();
        let y = self.column_header_height();
        Rect::new(x, y, (self.width - x).max(0.0), (self.height - y).max(0.0))
    }

    pub fn content_width(&self) -> f32 {
        self.cols as f32 * self.cell_width
    }

    pub fn content_height(&self) -> f32 {
        self.rows as f32 * self.cell_height
    }

    /// Left edge of column `col` on the surface, for body and column header alike
    pub fn column_x(&self, col: usize, viewport: &GridViewport) -> f32 {
        self.row_header_width() + col as f32 * self.cell_width - viewport.scroll_x
    }

    /// Top edge of row `row` on the surface, for body and row header alike
    pub fn row_y(&self, row: usize, viewport: &GridViewport) -> f32 {
        self.column_header_height() + row as f32 * self.cell_height - viewport.scroll_y
    }

    pub fn cell_rect(&self, row: usize, col: usize, viewport: &GridViewport) -> Rect {
        Rect::new(
            self.column_x(col, viewport),
            self.row_y(row, viewport),
            self.cell_width,
            self.cell_height,
        )
    }

    fn col_at(&self, x: f32, viewport: &GridViewport) -> Option<usize> {
        let offset = x - self.row_header_width() + viewport.scroll_x;
        if offset < 0.0 || self.cell_width <= 0.0 {
            return None;
        }
        let col = (offset / self.cell_width) as usize;
        (col < self.cols).then_some(col)
    }

    fn row_at(&self, y: f32, viewport: &GridViewport) -> Option<usize> {
        let offset = y - self.column_header_height() + viewport.scroll_y;
        if offset < 0.0 || self.cell_height <= 0.0 {
            return None;
        }
        let row = (offset / self.cell_height) as usize;
        (row < self.rows).then_some(row)
    }

    /// What lies under surface point `(x, y)`
    pub fn hit_test(&self, x: f32, y: f32, viewport: &GridViewport) -> HitTarget {
        if !self.bounds().contains(x, y) {
            return HitTarget::None;
        }

        let in_row_header = x < self.row_header_width();
        let in_column_header = y < self.column_header_height();

        let hit = match (in_row_header, in_column_header) {
            (true, true) => Some(HitTarget::Corner),
            (false, true) => self.col_at(x, viewport).map(|col| {
                if y < self.cell_height {
                    HitTarget::ColumnLabel(col)
                } else {
                    HitTarget::ColumnName(col)
                }
            }),
            (true, false) => self.row_at(y, viewport).map(|row| {
                if x < self.cell_width {
                    HitTarget::RowNumber(row)
                } else {
                    HitTarget::RowName(row)
                }
            }),
            (false, false) => self
                .row_at(y, viewport)
                .zip(self.col_at(x, viewport))
                .map(|(row, col)| HitTarget::Cell { row, col }),
        };
        hit.unwrap_or(HitTarget::None)
    }
}

/// Result of a hit test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HitTarget {
    #[default]
    None,
    Corner,
    ColumnLabel(usize),
    ColumnName(usize),
    RowNumber(usize),
    RowName(usize),
    Cell {
        row: usize,
        col: usize,
    },
}

impl HitTarget {
    /// Pooled widget that receives clicks on this target. Labels and row
    /// numbers are static.
    pub fn widget_key(self) -> Option<WidgetKey> {
        match self {
            HitTarget::ColumnName(col) => Some(WidgetKey::ColumnName(col)),
            HitTarget::RowName(row) => Some(WidgetKey::RowName(row)),
            HitTarget::Cell { row, col } => Some(WidgetKey::Cell { row, col }),
            _ => None,
        }
    }
}
