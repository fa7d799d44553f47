//! View module - executes grid draw ops on a softbuffer surface
//!
//! The grid core produces a `RenderedRegion` of draw ops in surface
//! pixels; the renderer draws the selection summary bar on top and the grid
//! below it, then presents the back buffer.

pub mod frame;

pub use frame::{Frame, TextPainter};

use std::collections::HashMap;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context as _, Result};
use fontdue::{Font, FontSettings, LineMetrics, Metrics};
use softbuffer::Surface;
use winit::window::Window;

use tablegrid::grid::{DrawOp, Rect};
use tablegrid::theme::GridTheme;
use tablegrid::{DataGrid, FrameContext, GridConfig, GridEvent, TableModel};

pub type GlyphCacheKey = (char, u32);

pub type GlyphCache = HashMap<GlyphCacheKey, (Metrics, Vec<u8>)>;

/// Fonts tried in order when no `font_path` is configured
const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Loaded font plus the metrics derived from it at the current scale
struct LoadedFont {
    font: Font,
    font_size: f32,
    line_metrics: LineMetrics,
}

pub struct Renderer {
    font: Option<LoadedFont>,
    surface: Surface<Rc<Window>, Rc<Window>>,
    /// Persistent back buffer copied to the surface on present
    back_buffer: Vec<u32>,
    width: u32,
    height: u32,
    glyph_cache: GlyphCache,
    scale_factor: f64,
}

impl Renderer {
    pub fn new(
        window: Rc<Window>,
        context: &softbuffer::Context<Rc<Window>>,
        config: &GridConfig,
    ) -> Result<Self> {
        let scale_factor = window.scale_factor();
        let (width, height) = {
            let size = window.inner_size();
            (size.width.max(1), size.height.max(1))
        };

        let mut surface = Surface::new(context, Rc::clone(&window))
            .map_err(|e| anyhow::anyhow!("Failed to create surface: {}", e))?;
        resize_surface(&mut surface, width, height)?;

        let font = match load_font(config.font_path.as_deref()) {
            Ok(font) => Some(LoadedFont::new(font, config.font_size * scale_factor as f32)?),
            Err(e) => {
                tracing::warn!("Rendering without text: {:#}", e);
                None
            }
        };

        Ok(Self {
            font,
            surface,
            back_buffer: vec![0u32; (width as usize) * (height as usize)],
            width,
            height,
            glyph_cache: HashMap::new(),
            scale_factor,
        })
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Height of the selection summary bar in pixels
    pub fn summary_bar_height(&self) -> f32 {
        let line = self
            .font
            .as_ref()
            .map_or(0.0, |f| f.line_metrics.new_line_size.ceil());
        (line + 8.0 * self.scale_factor as f32).max(24.0 * self.scale_factor as f32)
    }

    pub fn is_in_summary_bar(&self, y: f64) -> bool {
        y < self.summary_bar_height() as f64
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        let (width, height) = (width.max(1), height.max(1));
        if (width, height) == (self.width, self.height) {
            return Ok(());
        }
        self.width = width;
        self.height = height;
        self.back_buffer
            .resize((width as usize) * (height as usize), 0);
        resize_surface(&mut self.surface, width, height)
    }

    /// Rescale geometry and glyphs after a DPI change
    pub fn set_scale_factor(&mut self, scale_factor: f64, config: &GridConfig) -> Result<()> {
        self.scale_factor = scale_factor;
        if let Some(loaded) = self.font.take() {
            self.font = Some(LoadedFont::new(
                loaded.font,
                config.font_size * scale_factor as f32,
            )?);
        }
        self.glyph_cache.clear();
        Ok(())
    }

    /// Lay out one frame with `events` and present it
    pub fn render<T: TableModel>(
        &mut self,
        grid: &mut DataGrid<T>,
        events: Vec<GridEvent>,
    ) -> Result<()> {
        let width = self.width as f32;
        let height = self.height as f32;
        let bar_height = self.summary_bar_height();
        let scale = self.scale_factor as f32;

        let ctx = FrameContext::new(width, (height - bar_height).max(0.0))
            .with_scale(scale)
            .with_events(events);
        let region = grid.layout(ctx);
        let theme = &grid.style().theme;

        {
            let mut frame = Frame::new(&mut self.back_buffer, self.width as usize, self.height as usize);
            frame.clear(theme.background.to_argb_u32());

            let mut text = self.font.as_ref().map(|loaded| {
                TextPainter::new(
                    &loaded.font,
                    &mut self.glyph_cache,
                    loaded.font_size,
                    loaded.line_metrics.ascent,
                    loaded.line_metrics.new_line_size.ceil(),
                )
            });

            frame.push_clip(Rect::new(0.0, bar_height, width, height - bar_height));
            for op in &region.ops {
                draw_op(&mut frame, text.as_mut(), op, bar_height, scale);
            }
            frame.pop_clip();

            let summary = grid
                .selection_summary()
                .unwrap_or_else(|| "No cell selected".to_string());
            render_summary_bar(&mut frame, text.as_mut(), theme, &summary, bar_height, scale);
        }

        let mut buffer = self
            .surface
            .buffer_mut()
            .map_err(|e| anyhow::anyhow!("Failed to get surface buffer: {}", e))?;
        buffer.copy_from_slice(&self.back_buffer);
        buffer
            .present()
            .map_err(|e| anyhow::anyhow!("Failed to present buffer: {}", e))?;

        Ok(())
    }
}

impl LoadedFont {
    fn new(font: Font, font_size: f32) -> Result<Self> {
        let line_metrics = font
            .horizontal_line_metrics(font_size)
            .context("Font missing horizontal line metrics")?;
        Ok(Self {
            font,
            font_size,
            line_metrics,
        })
    }
}

fn resize_surface(
    surface: &mut Surface<Rc<Window>, Rc<Window>>,
    width: u32,
    height: u32,
) -> Result<()> {
    let (Some(w), Some(h)) = (NonZeroU32::new(width), NonZeroU32::new(height)) else {
        return Ok(());
    };
    surface
        .resize(w, h)
        .map_err(|e| anyhow::anyhow!("Failed to resize surface: {}", e))
}

/// Load the configured font, or the first system font found
fn load_font(path: Option<&Path>) -> Result<Font> {
    let path: PathBuf = match path {
        Some(path) => path.to_path_buf(),
        None => SYSTEM_FONT_CANDIDATES
            .iter()
            .map(PathBuf::from)
            .find(|p| p.exists())
            .context("No font configured and no system font found; set font_path")?,
    };

    let bytes = std::fs::read(&path)
        .with_context(|| format!("Failed to read font {}", path.display()))?;
    let font = Font::from_bytes(bytes, FontSettings::default())
        .map_err(|e| anyhow::anyhow!("Failed to load font {}: {}", path.display(), e))?;
    tracing::info!("Loaded font {}", path.display());
    Ok(font)
}

fn offset(rect: Rect, dy: f32) -> Rect {
    Rect::new(rect.x, rect.y + dy, rect.width, rect.height)
}

/// Execute one draw op, shifted down by `dy` pixels
fn draw_op(frame: &mut Frame, text: Option<&mut TextPainter>, op: &DrawOp, dy: f32, scale: f32) {
    match op {
        DrawOp::Fill { rect, color } => {
            frame.fill_rect_blended(offset(*rect, dy), color.to_argb_u32());
        }
        DrawOp::Text {
            rect,
            text: content,
            color,
            bold,
        } => {
            if let Some(painter) = text {
                let rect = offset(*rect, dy);
                frame.push_clip(rect);
                painter.draw_in(frame, rect, content, color.to_argb_u32(), *bold);
                frame.pop_clip();
            }
        }
        DrawOp::Caret {
            rect,
            prefix,
            color,
        } => {
            let rect = offset(*rect, dy);
            let (x, line_height) = match text {
                Some(painter) => (rect.x + painter.measure_width(prefix), painter.line_height()),
                None => (rect.x, rect.height * 0.6),
            };
            let caret_height = line_height.min(rect.height);
            let y = rect.y + (rect.height - caret_height) / 2.0;
            frame.fill_rect(
                Rect::new(x, y, (1.5 * scale).max(1.0), caret_height),
                color.to_argb_u32(),
            );
        }
        DrawOp::Clip(rect) => frame.push_clip(offset(*rect, dy)),
        DrawOp::Unclip => frame.pop_clip(),
    }
}

fn render_summary_bar(
    frame: &mut Frame,
    text: Option<&mut TextPainter>,
    theme: &GridTheme,
    summary: &str,
    height: f32,
    scale: f32,
) {
    let rect = Rect::new(0.0, 0.0, frame.width() as f32, height);
    frame.fill_rect(rect, theme.summary_bar.background.to_argb_u32());
    frame.fill_rect(
        Rect::new(0.0, height - scale.max(1.0), rect.width, scale.max(1.0)),
        theme.grid_line.to_argb_u32(),
    );
    if let Some(painter) = text {
        painter.draw_in(
            frame,
            rect.inset(8.0 * scale, 0.0),
            summary,
            theme.summary_bar.foreground.to_argb_u32(),
            false,
        );
    }
}
