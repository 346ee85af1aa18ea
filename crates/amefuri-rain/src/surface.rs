//! The drawing surface the rain paints on.

use amefuri_core::{
    Rgba,
    constants::{GLOW_BLUR, GLOW_COLOR},
};

/// A drop shadow drawn behind a glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: Rgba,
    /// Blur radius in pixels.
    pub blur: f32,
}

impl Shadow {
    /// The glow of a near layer's head glyph.
    pub const GLOW: Self = Self {
        color: GLOW_COLOR,
        blur: GLOW_BLUR,
    };
}

/// One glyph to render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphPaint {
    pub glyph: char,
    /// Left edge in pixels.
    pub x: f32,
    /// Baseline in pixels.
    pub y: f32,
    /// Font size in pixels.
    pub size: f32,
    pub color: Rgba,
    pub shadow: Option<Shadow>,
}

/// A 2D pixel surface.
pub trait Surface {
    /// Width and height in pixels.
    fn size(&self) -> (f32, f32);

    /// Change the pixel size. Previous content is discarded.
    fn resize(&mut self, width: f32, height: f32);

    /// Composite `color` over the whole surface.
    fn fill_overlay(&mut self, color: Rgba);

    /// Render a single glyph.
    fn fill_glyph(&mut self, paint: &GlyphPaint);
}
