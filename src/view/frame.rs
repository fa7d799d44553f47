//! Frame abstraction for drawing primitives
//!
//! Provides a small, safe API over the softbuffer pixel buffer: solid and
//! blended fills, a nested clip stack and glyph drawing through
//! [`TextPainter`].

use fontdue::Font;
use tablegrid::grid::Rect;

use super::GlyphCache;

/// Blend a foreground color onto a background color using alpha compositing.
///
/// Both colors are in ARGB format (0xAARRGGBB). Returns the blended color
/// with full opacity.
#[inline]
pub fn blend_colors(bg: u32, fg: u32, alpha: f32) -> u32 {
    let bg_r = ((bg >> 16) & 0xFF) as f32;
    let bg_g = ((bg >> 8) & 0xFF) as f32;
    let bg_b = (bg & 0xFF) as f32;

    let fg_r = ((fg >> 16) & 0xFF) as f32;
    let fg_g = ((fg >> 8) & 0xFF) as f32;
    let fg_b = (fg & 0xFF) as f32;

    let final_r = (bg_r * (1.0 - alpha) + fg_r * alpha) as u32;
    let final_g = (bg_g * (1.0 - alpha) + fg_g * alpha) as u32;
    let final_b = (bg_b * (1.0 - alpha) + fg_b * alpha) as u32;

    0xFF000000 | (final_r << 16) | (final_g << 8) | final_b
}

/// Clipping rectangle in pixel coordinates (inclusive start, exclusive end).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ClipRect {
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
}

impl ClipRect {
    fn intersect(self, other: ClipRect) -> ClipRect {
        let x0 = self.x0.max(other.x0);
        let y0 = self.y0.max(other.y0);
        ClipRect {
            x0,
            y0,
            x1: self.x1.min(other.x1).max(x0),
            y1: self.y1.min(other.y1).max(y0),
        }
    }
}

/// A frame buffer wrapper providing safe drawing primitives.
///
/// All coordinates are in pixels. Out-of-bounds operations are clipped.
pub struct Frame<'a> {
    buffer: &'a mut [u32],
    width: usize,
    height: usize,
    clips: Vec<ClipRect>,
}

impl<'a> Frame<'a> {
    /// Create a new frame from a mutable pixel buffer
    ///
    /// If the buffer is smaller than width*height, the height is reduced to
    /// fit the actual buffer.
    pub fn new(buffer: &'a mut [u32], width: usize, height: usize) -> Self {
        let expected_size = width * height;
        let actual_size = buffer.len();

        let height = if actual_size < expected_size && width > 0 {
            actual_size / width
        } else {
            height
        };

        Self {
            buffer,
            width,
            height,
            clips: Vec::new(),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    fn to_clip(&self, rect: Rect) -> ClipRect {
        let x0 = (rect.x.max(0.0) as usize).min(self.width);
        let y0 = (rect.y.max(0.0) as usize).min(self.height);
        let x1 = (rect.right().max(0.0) as usize).min(self.width).max(x0);
        let y1 = (rect.bottom().max(0.0) as usize).min(self.height).max(y0);
        ClipRect { x0, y0, x1, y1 }
    }

    /// Current clip, or the whole frame
    fn clip(&self) -> ClipRect {
        self.clips.last().copied().unwrap_or(ClipRect {
            x0: 0,
            y0: 0,
            x1: self.width,
            y1: self.height,
        })
    }

    /// Intersect the current clip with `rect` until the matching [`Frame::pop_clip`]
    pub fn push_clip(&mut self, rect: Rect) {
        let clip = self.clip().intersect(self.to_clip(rect));
        self.clips.push(clip);
    }

    /// Restore the clip active before the last `push_clip`
    pub fn pop_clip(&mut self) {
        if self.clips.pop().is_none() {
            tracing::trace!("Unbalanced clip pop ignored");
        }
    }

    #[inline]
    pub fn clear(&mut self, color: u32) {
        self.buffer.fill(color);
    }

    /// Fill a rectangle with a solid color (no alpha blending)
    pub fn fill_rect(&mut self, rect: Rect, color: u32) {
        let area = self.clip().intersect(self.to_clip(rect));
        for y in area.y0..area.y1 {
            let row_start = y * self.width;
            self.buffer[row_start + area.x0..row_start + area.x1].fill(color);
        }
    }

    /// Fill a rectangle honoring the color's alpha (ARGB format)
    pub fn fill_rect_blended(&mut self, rect: Rect, color: u32) {
        let alpha = ((color >> 24) & 0xFF) as f32 / 255.0;
        if alpha <= 0.0 {
            return;
        }
        if alpha >= 1.0 {
            return self.fill_rect(rect, color | 0xFF000000);
        }

        let area = self.clip().intersect(self.to_clip(rect));
        for y in area.y0..area.y1 {
            let row_start = y * self.width;
            for x in area.x0..area.x1 {
                let idx = row_start + x;
                self.buffer[idx] = blend_colors(self.buffer[idx], color, alpha);
            }
        }
    }

    /// Blend a pixel with coverage `alpha` (bounds-checked, respects clip)
    #[inline]
    pub fn blend_pixel(&mut self, x: isize, y: isize, color: u32, alpha: f32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        let clip = self.clip();
        if x < clip.x0 || x >= clip.x1 || y < clip.y0 || y >= clip.y1 {
            return;
        }
        let idx = y * self.width + x;
        self.buffer[idx] = blend_colors(self.buffer[idx], color, alpha);
    }

    #[cfg(test)]
    fn pixel(&self, x: usize, y: usize) -> u32 {
        self.buffer[y * self.width + x]
    }
}

/// Text rendering context wrapping font and glyph cache.
pub struct TextPainter<'a> {
    font: &'a Font,
    glyph_cache: &'a mut GlyphCache,
    font_size: f32,
    ascent: f32,
    line_height: f32,
}

impl<'a> TextPainter<'a> {
    pub fn new(
        font: &'a Font,
        glyph_cache: &'a mut GlyphCache,
        font_size: f32,
        ascent: f32,
        line_height: f32,
    ) -> Self {
        Self {
            font,
            glyph_cache,
            font_size,
            ascent,
            line_height,
        }
    }

    #[inline]
    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Draw text with its line box starting at `(x, y)`
    pub fn draw(&mut self, frame: &mut Frame, x: f32, y: f32, text: &str, color: u32) {
        let mut current_x = x;
        let baseline = y + self.ascent;

        for ch in text.chars() {
            let key = (ch, self.font_size.to_bits());
            let (metrics, bitmap) = self
                .glyph_cache
                .entry(key)
                .or_insert_with(|| self.font.rasterize(ch, self.font_size));

            let glyph_top = baseline - metrics.height as f32 - metrics.ymin as f32;

            for bitmap_y in 0..metrics.height {
                for bitmap_x in 0..metrics.width {
                    let alpha = bitmap
                        .get(bitmap_y * metrics.width + bitmap_x)
                        .copied()
                        .unwrap_or(0);
                    if alpha > 0 {
                        let px = current_x as isize + bitmap_x as isize + metrics.xmin as isize;
                        let py = (glyph_top + bitmap_y as f32) as isize;
                        frame.blend_pixel(px, py, color, alpha as f32 / 255.0);
                    }
                }
            }

            current_x += metrics.advance_width;
        }
    }

    /// Draw text vertically centered in `rect`, starting at its left edge
    pub fn draw_in(&mut self, frame: &mut Frame, rect: Rect, text: &str, color: u32, bold: bool) {
        let y = rect.y + ((rect.height - self.line_height) / 2.0).max(0.0);
        self.draw(frame, rect.x, y, text, color);
        if bold {
            self.draw(frame, rect.x + 1.0, y, text, color);
        }
    }

    /// Measure text width in pixels
    pub fn measure_width(&mut self, text: &str) -> f32 {
        let mut width = 0.0;
        for ch in text.chars() {
            let key = (ch, self.font_size.to_bits());
            let (metrics, _) = self
                .glyph_cache
                .entry(key)
                .or_insert_with(|| self.font.rasterize(ch, self.font_size));
            width += metrics.advance_width;
        }
        width
    }
}
