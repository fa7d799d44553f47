//! Paint pass: turns grid state into host-executable draw ops
//!
//! Only rows and columns intersecting the viewport are emitted. Regions are
//! painted body first, then the two headers, then the corner, each under its
//! own clip rectangle so scrolled content never bleeds into frozen areas.

use std::ops::Range;

use super::edit::cell_display;
use super::labels::index_to_letters;
use super::layout::{GridMetrics, HitTarget, Rect};
use super::selection::Highlight;
use super::state::GridState;
use super::text::truncate;
use super::viewport::GridViewport;
use crate::table::TableModel;
use crate::theme::{Color, GridTheme};

/// Primitive drawing operation executed by the host
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Fill {
        rect: Rect,
        color: Color,
    },
    /// Single line of text, left aligned and vertically centered in `rect`
    Text {
        rect: Rect,
        text: String,
        color: Color,
        bold: bool,
    },
    /// Text caret drawn after `prefix` as laid out in `rect`
    Caret {
        rect: Rect,
        prefix: String,
        color: Color,
    },
    /// Intersect the current clip with `Rect` until the matching `Unclip`
    Clip(Rect),
    Unclip,
}

/// Which of the four regions a rendered cell belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Corner,
    ColumnHeader,
    RowHeader,
    Body,
}

/// One painted cell, kept for inspection by hosts and tests
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedCell {
    pub region: Region,
    pub target: HitTarget,
    pub rect: Rect,
    /// Text as painted (truncated unless editing)
    pub text: String,
    pub highlight: Highlight,
    pub editing: bool,
}

/// Output of one layout pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderedRegion {
    pub bounds: Rect,
    pub ops: Vec<DrawOp>,
    pub cells: Vec<RenderedCell>,
    pub visible_rows: Range<usize>,
    pub visible_cols: Range<usize>,
}

impl RenderedRegion {
    /// Nothing to draw, e.g. when no table is bound
    pub fn empty(bounds: Rect) -> Self {
        Self {
            bounds,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty() && self.cells.is_empty()
    }

    pub fn find(&self, target: HitTarget) -> Option<&RenderedCell> {
        self.cells.iter().find(|cell| cell.target == target)
    }

    pub fn body_cell(&self, row: usize, col: usize) -> Option<&RenderedCell> {
        self.find(HitTarget::Cell { row, col })
    }

    pub fn cells_in(&self, region: Region) -> impl Iterator<Item = &RenderedCell> {
        self.cells.iter().filter(move |cell| cell.region == region)
    }

    /// The cell drawn as the active edit target, if visible
    pub fn editing_cell(&self) -> Option<&RenderedCell> {
        self.cells.iter().find(|cell| cell.editing)
    }
}

pub(crate) struct Painter<'a, T: ?Sized> {
    pub table: &'a T,
    pub state: &'a GridState,
    pub metrics: GridMetrics,
    pub viewport: GridViewport,
    pub theme: &'a GridTheme,
    pub corner_label: &'a str,
    /// Display-cell budget for truncated cell and name text
    pub text_budget: usize,
}

impl<T: TableModel + ?Sized> Painter<'_, T> {
    pub fn paint(&self) -> RenderedRegion {
        let rows = self.viewport.visible_rows(&self.metrics);
        let cols = self.viewport.visible_cols(&self.metrics);
        let mut out = RenderedRegion {
            bounds: self.metrics.bounds(),
            ops: Vec::with_capacity(rows.len() * cols.len() * 3 + 16),
            cells: Vec::with_capacity((rows.len() + 2) * (cols.len() + 2)),
            visible_rows: rows.clone(),
            visible_cols: cols.clone(),
        };

        out.ops.push(DrawOp::Fill {
            rect: out.bounds,
            color: self.theme.background,
        });

        self.paint_body(&mut out, rows.clone(), cols.clone());
        self.paint_column_header(&mut out, cols);
        self.paint_row_header(&mut out, rows);
        self.paint_corner(&mut out);
        out
    }

    fn border(&self) -> f32 {
        self.metrics.scale.round().max(1.0)
    }

    fn padding(&self) -> f32 {
        4.0 * self.metrics.scale
    }

    /// Cell background with grid lines on the right and bottom edges
    fn push_box(&self, ops: &mut Vec<DrawOp>, rect: Rect, fill: Color) {
        let border = self.border();
        ops.push(DrawOp::Fill {
            rect,
            color: self.theme.grid_line,
        });
        ops.push(DrawOp::Fill {
            rect: Rect::new(
                rect.x,
                rect.y,
                (rect.width - border).max(0.0),
                (rect.height - border).max(0.0),
            ),
            color: fill,
        });
    }

    fn push_text(&self, ops: &mut Vec<DrawOp>, rect: Rect, text: &str, color: Color, bold: bool) {
        if text.is_empty() {
            return;
        }
        ops.push(DrawOp::Text {
            rect: rect.inset(self.padding(), 0.0),
            text: text.to_string(),
            color,
            bold,
        });
    }

    /// Bordered edit box showing the live buffer and caret.
    ///
    /// Returns the text drawn.
    fn push_editor(&self, ops: &mut Vec<DrawOp>, rect: Rect, fill: Color, border_color: Color) -> String {
        let border = self.border();
        let editor = &self.theme.editor;
        let (text, prefix) = self
            .state
            .active_editor()
            .map(|buf| (buf.text().to_string(), buf.before_cursor().to_string()))
            .unwrap_or_default();

        ops.push(DrawOp::Fill {
            rect,
            color: border_color,
        });
        let inner = rect.inset(border * 2.0, border * 2.0);
        ops.push(DrawOp::Fill {
            rect: inner,
            color: fill,
        });

        let text_rect = inner.inset((self.padding() - border * 2.0).max(0.0), 0.0);
        ops.push(DrawOp::Clip(inner));
        if !text.is_empty() {
            ops.push(DrawOp::Text {
                rect: text_rect,
                text: text.clone(),
                color: editor.foreground,
                bold: false,
            });
        }
        ops.push(DrawOp::Caret {
            rect: text_rect,
            prefix,
            color: editor.caret,
        });
        ops.push(DrawOp::Unclip);
        text
    }

    fn paint_body(&self, out: &mut RenderedRegion, rows: Range<usize>, cols: Range<usize>) {
        let target = self.state.edit_target();
        let selection = self.state.selection();
        let body = self.metrics.body_rect();

        out.ops.push(DrawOp::Clip(body));
        for row in rows {
            for col in cols.clone() {
                let rect = self.metrics.cell_rect(row, col, &self.viewport);
                let highlight = selection.highlight(row, col);
                let editing = target.is_cell(row, col);

                let text = if editing {
                    self.push_editor(
                        &mut out.ops,
                        rect,
                        self.theme.editor.cell_background,
                        self.theme.editor.cell_border,
                    )
                } else {
                    let fill = match highlight {
                        Highlight::Cell => self.theme.selection.cell,
                        Highlight::Row => self.theme.selection.row,
                        Highlight::Column => self.theme.selection.column,
                        Highlight::None => self.theme.cell.background,
                    };
                    self.push_box(&mut out.ops, rect, fill);
                    let text = truncate(&cell_display(self.table, row, col), self.text_budget);
                    self.push_text(&mut out.ops, rect, &text, self.theme.cell.foreground, false);
                    text
                };

                out.cells.push(RenderedCell {
                    region: Region::Body,
                    target: HitTarget::Cell { row, col },
                    rect,
                    text,
                    highlight,
                    editing,
                });
            }
        }
        out.ops.push(DrawOp::Unclip);
    }

    fn paint_column_header(&self, out: &mut RenderedRegion, cols: Range<usize>) {
        let header = &self.theme.header;
        let area = self.metrics.column_header_rect();
        let target = self.state.edit_target();
        let cell_height = self.metrics.cell_height;

        out.ops.push(DrawOp::Clip(area));
        out.ops.push(DrawOp::Fill {
            rect: area,
            color: header.background,
        });
        for col in cols {
            let x = self.metrics.column_x(col, &self.viewport);
            let selected = self.state.selection().is_column_selected(col);
            let highlight = if selected {
                Highlight::Column
            } else {
                Highlight::None
            };

            let label_rect = Rect::new(x, 0.0, self.metrics.cell_width, cell_height);
            let label = index_to_letters(col);
            self.push_box(
                &mut out.ops,
                label_rect,
                if selected {
                    header.highlight
                } else {
                    header.label_background
                },
            );
            self.push_text(&mut out.ops, label_rect, &label, header.label_foreground, true);
            out.cells.push(RenderedCell {
                region: Region::ColumnHeader,
                target: HitTarget::ColumnLabel(col),
                rect: label_rect,
                text: label,
                highlight,
                editing: false,
            });

            let name_rect = Rect::new(x, cell_height, self.metrics.cell_width, cell_height);
            let editing = target.is_column_name(col);
            let text = if editing {
                self.push_editor(
                    &mut out.ops,
                    name_rect,
                    self.theme.editor.name_background,
                    self.theme.editor.name_border,
                )
            } else {
                self.push_box(
                    &mut out.ops,
                    name_rect,
                    if selected {
                        header.highlight
                    } else {
                        header.name_background
                    },
                );
                let text = truncate(&self.table.column_name(col), self.text_budget);
                self.push_text(&mut out.ops, name_rect, &text, header.name_foreground, true);
                text
            };
            out.cells.push(RenderedCell {
                region: Region::ColumnHeader,
                target: HitTarget::ColumnName(col),
                rect: name_rect,
                text,
                highlight,
                editing,
            });
        }
        out.ops.push(DrawOp::Unclip);
    }

    fn paint_row_header(&self, out: &mut RenderedRegion, rows: Range<usize>) {
        let header = &self.theme.header;
        let area = self.metrics.row_header_rect();
        let target = self.state.edit_target();
        let cell_width = self.metrics.cell_width;

        out.ops.push(DrawOp::Clip(area));
        out.ops.push(DrawOp::Fill {
            rect: area,
            color: header.background,
        });
        for row in rows {
            let y = self.metrics.row_y(row, &self.viewport);
            let selected = self.state.selection().is_row_selected(row);
            let highlight = if selected {
                Highlight::Row
            } else {
                Highlight::None
            };

            let number_rect = Rect::new(0.0, y, cell_width, self.metrics.cell_height);
            let number = (row + 1).to_string();
            self.push_box(
                &mut out.ops,
                number_rect,
                if selected {
                    header.highlight
                } else {
                    header.row_number_background
                },
            );
            self.push_text(&mut out.ops, number_rect, &number, header.row_number_foreground, false);
            out.cells.push(RenderedCell {
                region: Region::RowHeader,
                target: HitTarget::RowNumber(row),
                rect: number_rect,
                text: number,
                highlight,
                editing: false,
            });

            let name_rect = Rect::new(cell_width, y, cell_width, self.metrics.cell_height);
            let editing = target.is_row_name(row);
            let text = if editing {
                self.push_editor(
                    &mut out.ops,
                    name_rect,
                    self.theme.editor.name_background,
                    self.theme.editor.name_border,
                )
            } else {
                self.push_box(
                    &mut out.ops,
                    name_rect,
                    if selected {
                        header.highlight
                    } else {
                        header.name_background
                    },
                );
                let text = truncate(&self.table.row_name(row), self.text_budget);
                self.push_text(&mut out.ops, name_rect, &text, header.name_foreground, false);
                text
            };
            out.cells.push(RenderedCell {
                region: Region::RowHeader,
                target: HitTarget::RowName(row),
                rect: name_rect,
                text,
                highlight,
                editing,
            });
        }
        out.ops.push(DrawOp::Unclip);
    }

    fn paint_corner(&self, out: &mut RenderedRegion) {
        let header = &self.theme.header;
        let rect = self.metrics.corner_rect();

        out.ops.push(DrawOp::Clip(rect));
        self.push_box(&mut out.ops, rect, header.corner_background);
        self.push_text(&mut out.ops, rect, self.corner_label, header.corner_foreground, true);
        out.ops.push(DrawOp::Unclip);
        out.cells.push(RenderedCell {
            region: Region::Corner,
            target: HitTarget::Corner,
            rect,
            text: self.corner_label.to_string(),
            highlight: Highlight::None,
            editing: false,
        });
    }
}

