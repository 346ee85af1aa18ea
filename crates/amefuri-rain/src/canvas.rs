//! A surface backed by terminal cells.
//!
//! Every cell stands for a `cell_width` x `cell_height` block of pixels and
//! keeps one glyph plus the color composited onto it so far. Overlays fade
//! the stored colors the same way a translucent fill fades a bitmap.

use amefuri_core::Rgba;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::color::{composite, luminance, to_terminal_color};
use crate::surface::{GlyphPaint, Surface};

/// Cells dimmer than this lose their glyph.
const FADE_FLOOR: f32 = 0.02;

/// Default pixel width of one terminal cell.
pub const DEFAULT_CELL_WIDTH: f32 = 8.0;

/// Default pixel height of one terminal cell.
pub const DEFAULT_CELL_HEIGHT: f32 = 16.0;

/// Content of one terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cell {
    pub glyph: Option<char>,
    /// Composited color, channels in `0.0..=1.0`.
    pub color: [f32; 3],
    /// Set when the last glyph painted here had a shadow.
    pub glow: bool,
}

/// Grid of [`Cell`]s implementing [`Surface`].
#[derive(Debug, Clone)]
pub struct CellCanvas {
    cols: u16,
    rows: u16,
    cell_width: f32,
    cell_height: f32,
    cells: Vec<Cell>,
}

impl CellCanvas {
    /// Create a blank canvas of `cols` x `rows` cells.
    ///
    /// Non-positive cell sizes fall back to the defaults.
    pub fn new(cols: u16, rows: u16, cell_width: f32, cell_height: f32) -> Self {
        let cell_width = if cell_width > 0.0 {
            cell_width
        } else {
            DEFAULT_CELL_WIDTH
        };
        let cell_height = if cell_height > 0.0 {
            cell_height
        } else {
            DEFAULT_CELL_HEIGHT
        };
        Self {
            cols,
            rows,
            cell_width,
            cell_height,
            cells: vec![Cell::default(); cols as usize * rows as usize],
        }
    }

    /// Grid size in cells.
    pub fn dimensions(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    /// Pixel size of one cell.
    pub fn cell_size(&self) -> (f32, f32) {
        (self.cell_width, self.cell_height)
    }

    /// Cell at `col`, `row`.
    pub fn cell(&self, col: u16, row: u16) -> Option<&Cell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        self.cells.get(row as usize * self.cols as usize + col as usize)
    }

    /// Index of the cell holding a glyph drawn with its baseline at `y`.
    fn index_at(&self, x: f32, y: f32) -> Option<usize> {
        if self.cols == 0 || self.rows == 0 || x < 0.0 {
            return None;
        }
        let col = (x / self.cell_width) as usize;
        if col >= self.cols as usize {
            return None;
        }
        // The baseline sits on the bottom edge of the glyph's cell.
        let row = (((y - 1.0).max(0.0) / self.cell_height) as usize).min(self.rows as usize - 1);
        Some(row * self.cols as usize + col)
    }

    /// Wrap for rendering at the given surface opacity.
    pub fn view(&self, opacity: f32) -> CanvasView<'_> {
        CanvasView {
            canvas: self,
            opacity,
        }
    }
}

impl Surface for CellCanvas {
    fn size(&self) -> (f32, f32) {
        (
            self.cols as f32 * self.cell_width,
            self.rows as f32 * self.cell_height,
        )
    }

    fn resize(&mut self, width: f32, height: f32) {
        let cols = (width.max(0.0) / self.cell_width) as u16;
        let rows = (height.max(0.0) / self.cell_height) as u16;
        *self = Self::new(cols, rows, self.cell_width, self.cell_height);
    }

    fn fill_overlay(&mut self, color: Rgba) {
        if color.is_transparent() {
            return;
        }
        for cell in &mut self.cells {
            cell.color = composite(cell.color, color);
            if luminance(cell.color) < FADE_FLOOR {
                *cell = Cell::default();
            }
        }
    }

    fn fill_glyph(&mut self, paint: &GlyphPaint) {
        let Some(idx) = self.index_at(paint.x, paint.y) else {
            return;
        };
        let cell = &mut self.cells[idx];
        cell.color = composite(cell.color, paint.color);
        cell.glyph = Some(paint.glyph);
        cell.glow = paint.shadow.is_some();
    }
}

/// A [`CellCanvas`] rendered at a surface opacity.
#[derive(Debug, Clone, Copy)]
pub struct CanvasView<'a> {
    pub canvas: &'a CellCanvas,
    /// Opacity of the whole surface, `0.0..=1.0`.
    pub opacity: f32,
}

impl Widget for CanvasView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.opacity <= 0.0 {
            return;
        }
        let rows = self.canvas.rows.min(area.height);
        let cols = self.canvas.cols.min(area.width);

        for row in 0..rows {
            // Katakana take two terminal columns; the cell after one is covered.
            let mut covered = false;
            for col in 0..cols {
                if covered {
                    covered = false;
                    continue;
                }
                let Some(cell) = self.canvas.cell(col, row) else {
                    continue;
                };
                let Some(glyph) = cell.glyph else {
                    continue;
                };

                let mut style = Style::new().fg(to_terminal_color(cell.color, self.opacity));
                if cell.glow {
                    style = style.add_modifier(Modifier::BOLD);
                }
                let x = area.x + col;
                let remaining = (area.x + cols - x) as usize;
                buf.set_stringn(x, area.y + row, glyph.to_string(), remaining, style);
                covered = !glyph.is_ascii();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    fn paint(glyph: char, x: f32, y: f32, color: Rgba) -> GlyphPaint {
        GlyphPaint {
            glyph,
            x,
            y,
            size: 16.0,
            color,
            shadow: None,
        }
    }

    #[test]
    fn test_size_follows_cells() {
        let canvas = CellCanvas::new(80, 24, 8.0, 16.0);
        assert_eq!(canvas.size(), (640.0, 384.0));
    }

    #[test]
    fn test_resize_rounds_down_and_clears() {
        let mut canvas = CellCanvas::new(4, 4, 8.0, 16.0);
        canvas.fill_glyph(&paint('A', 0.0, 16.0, Rgba::opaque(255, 255, 255)));
        canvas.resize(100.0, 50.0);
        assert_eq!(canvas.dimensions(), (12, 3));
        assert_eq!(canvas.cell(0, 0), Some(&Cell::default()));
    }

    #[test]
    fn test_invalid_cell_size_uses_defaults() {
        let canvas = CellCanvas::new(1, 1, 0.0, -3.0);
        assert_eq!(canvas.cell_size(), (DEFAULT_CELL_WIDTH, DEFAULT_CELL_HEIGHT));
    }

    #[test]
    fn test_glyph_lands_in_baseline_cell() {
        let mut canvas = CellCanvas::new(10, 10, 8.0, 16.0);
        canvas.fill_glyph(&paint('A', 17.0, 32.0, Rgba::opaque(255, 255, 255)));
        let cell = canvas.cell(2, 1).unwrap();
        assert_eq!(cell.glyph, Some('A'));
        assert_eq!(cell.color, [1.0, 1.0, 1.0]);

        canvas.fill_glyph(&paint('B', 0.0, 0.0, Rgba::opaque(255, 255, 255)));
        assert_eq!(canvas.cell(0, 0).unwrap().glyph, Some('B'));

        canvas.fill_glyph(&paint('C', 0.0, 160.0, Rgba::opaque(255, 255, 255)));
        assert_eq!(canvas.cell(0, 9).unwrap().glyph, Some('C'));
    }

    #[test]
    fn test_glyph_outside_width_is_dropped() {
        let mut canvas = CellCanvas::new(2, 2, 8.0, 16.0);
        canvas.fill_glyph(&paint('A', 16.0, 8.0, Rgba::opaque(255, 255, 255)));
        canvas.fill_glyph(&paint('A', -1.0, 8.0, Rgba::opaque(255, 255, 255)));
        assert!(canvas.cells.iter().all(|c| c.glyph.is_none()));
    }

    #[test]
    fn test_translucent_glyph_composites() {
        let mut canvas = CellCanvas::new(1, 1, 8.0, 16.0);
        canvas.fill_glyph(&paint('A', 0.0, 8.0, Rgba::new(0, 255, 0, 0.5)));
        let cell = canvas.cell(0, 0).unwrap();
        assert_eq!(cell.color, [0.0, 0.5, 0.0]);
    }

    #[test]
    fn test_overlay_fades_glyph_out() {
        let mut canvas = CellCanvas::new(1, 1, 8.0, 16.0);
        canvas.fill_glyph(&paint('A', 0.0, 8.0, Rgba::opaque(255, 255, 255)));
        canvas.fill_overlay(Rgba::new(0, 0, 0, 0.05));
        assert_eq!(canvas.cell(0, 0).unwrap().glyph, Some('A'));
        for _ in 0..200 {
            canvas.fill_overlay(Rgba::new(0, 0, 0, 0.05));
        }
        assert_eq!(canvas.cell(0, 0), Some(&Cell::default()));
    }

    #[test]
    fn test_shadow_marks_glow() {
        let mut canvas = CellCanvas::new(1, 1, 8.0, 16.0);
        let mut glowing = paint('A', 0.0, 8.0, Rgba::opaque(255, 255, 255));
        glowing.shadow = Some(crate::Shadow::GLOW);
        canvas.fill_glyph(&glowing);
        assert!(canvas.cell(0, 0).unwrap().glow);
        canvas.fill_glyph(&paint('B', 0.0, 8.0, Rgba::opaque(255, 255, 255)));
        assert!(!canvas.cell(0, 0).unwrap().glow);
    }

    #[test]
    fn test_view_renders_cells() {
        let mut canvas = CellCanvas::new(4, 2, 8.0, 16.0);
        canvas.fill_glyph(&paint('A', 0.0, 16.0, Rgba::opaque(0, 255, 0)));
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);

        canvas.view(1.0).render(area, &mut buf);

        assert_eq!(buf[(0, 0)].symbol(), "A");
        assert_eq!(buf[(0, 0)].fg, Color::Rgb(0, 255, 0));
        assert_eq!(buf[(1, 0)].symbol(), " ");
    }

    #[test]
    fn test_hidden_view_draws_nothing() {
        let mut canvas = CellCanvas::new(4, 2, 8.0, 16.0);
        canvas.fill_glyph(&paint('A', 0.0, 16.0, Rgba::opaque(0, 255, 0)));
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);

        canvas.view(0.0).render(area, &mut buf);

        assert_eq!(buf, Buffer::empty(area));
    }

    #[test]
    fn test_wide_glyph_covers_next_cell() {
        let mut canvas = CellCanvas::new(4, 1, 8.0, 16.0);
        canvas.fill_glyph(&paint('ア', 0.0, 8.0, Rgba::opaque(0, 255, 0)));
        canvas.fill_glyph(&paint('B', 8.0, 8.0, Rgba::opaque(0, 255, 0)));
        canvas.fill_glyph(&paint('C', 16.0, 8.0, Rgba::opaque(0, 255, 0)));
        let area = Rect::new(0, 0, 4, 1);
        let mut buf = Buffer::empty(area);

        canvas.view(1.0).render(area, &mut buf);

        assert_eq!(buf[(0, 0)].symbol(), "ア");
        assert_eq!(buf[(2, 0)].symbol(), "C");
    }
}
