//! Falling glyph columns.

use amefuri_core::{
    Layer, LayerCatalog,
    constants::{CHARACTER_SET, LENGTH_DIVISOR, MIN_LENGTH, START_DEPTH, VERTICAL_SPACING},
};
use rand::Rng;

use crate::surface::{GlyphPaint, Shadow, Surface};

/// One vertical stream of falling glyphs.
///
/// The glyph buffer runs from the head (index 0, bottom-most) up to the
/// oldest glyph of the trail. Its length is the column length.
#[derive(Debug, Clone)]
pub struct RainColumn {
    /// Left edge in pixels, fixed for the column's lifetime.
    x: f32,
    /// Baseline of the head glyph in pixels.
    y: f32,
    glyphs: Vec<char>,
    /// Visual parameters copied from the catalog on every reset.
    layer: Layer,
}

impl RainColumn {
    /// Create a column at `x` and give it a first random state.
    pub fn new<R: Rng + ?Sized>(
        x: f32,
        surface_height: f32,
        catalog: &LayerCatalog,
        rng: &mut R,
    ) -> Self {
        let mut column = Self {
            x,
            y: 0.0,
            glyphs: Vec::new(),
            layer: catalog.layers()[0],
        };
        column.reset(surface_height, catalog, rng);
        column
    }

    /// Re-initialize above the visible area with a new length, layer and glyphs.
    pub fn reset<R: Rng + ?Sized>(
        &mut self,
        surface_height: f32,
        catalog: &LayerCatalog,
        rng: &mut R,
    ) {
        let depth = surface_height * START_DEPTH;
        self.y = if depth > 0.0 {
            rng.random_range(-depth..0.0)
        } else {
            0.0
        };

        let extra = (surface_height / LENGTH_DIVISOR).floor().max(0.0) as usize;
        let length = if extra > 0 {
            MIN_LENGTH + rng.random_range(0..extra)
        } else {
            MIN_LENGTH
        };

        self.layer = *catalog.sample(rng);
        self.glyphs = (0..length).map(|_| random_glyph(rng)).collect();
    }

    /// Advance one frame: maybe flicker a glyph, fall, and reset once the
    /// whole column has left the bottom edge.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        surface_height: f32,
        flicker_chance: f64,
        catalog: &LayerCatalog,
        rng: &mut R,
    ) {
        if rng.random::<f64>() < flicker_chance && !self.glyphs.is_empty() {
            let idx = rng.random_range(0..self.glyphs.len());
            self.glyphs[idx] = random_glyph(rng);
        }

        self.y += self.layer.speed;

        if self.trailing_edge() > surface_height {
            self.reset(surface_height, catalog, rng);
        }
    }

    /// Paint the visible glyphs of the column.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let (_, height) = surface.size();
        let step = self.layer.size * VERTICAL_SPACING;

        for (i, &glyph) in self.glyphs.iter().enumerate() {
            let y = self.y - i as f32 * step;
            if !(0.0..=height).contains(&y) {
                continue;
            }

            let is_head = i == 0;
            surface.fill_glyph(&GlyphPaint {
                glyph,
                x: self.x,
                y,
                size: self.layer.size,
                color: if is_head {
                    self.layer.lead_color
                } else {
                    self.layer.trail_color
                },
                shadow: (is_head && self.layer.glow).then_some(Shadow::GLOW),
            });
        }
    }

    /// Position of the column's oldest glyph, used for the reset check.
    pub fn trailing_edge(&self) -> f32 {
        self.y - self.glyphs.len() as f32 * self.layer.size
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    /// Number of glyphs in the column.
    pub fn length(&self) -> usize {
        self.glyphs.len()
    }

    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    pub fn layer(&self) -> &Layer {
        &self.layer
    }
}

fn random_glyph<R: Rng + ?Sized>(rng: &mut R) -> char {
    CHARACTER_SET[rng.random_range(0..CHARACTER_SET.len())]
}
