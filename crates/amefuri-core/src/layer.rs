//! Depth layers and weighted layer selection.

use log::trace;
use rand::Rng;

use crate::Rgba;

/// Visual parameters of one depth tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    /// Name used in logs.
    pub name: &'static str,
    /// Glyph size in pixels.
    pub size: f32,
    /// Fall speed in pixels per frame.
    pub speed: f32,
    /// Color of every glyph behind the head.
    pub trail_color: Rgba,
    /// Color of the head glyph.
    pub lead_color: Rgba,
    /// Whether the head glyph glows.
    pub glow: bool,
    /// Selection probability. Weights of a catalog sum to 1.0.
    pub weight: f64,
}

/// The shipped layers, farthest first.
pub const LAYERS: [Layer; 3] = [
    Layer {
        name: "far",
        size: 12.0,
        speed: 1.0,
        trail_color: Rgba::new(0, 255, 70, 0.4),
        lead_color: Rgba::new(100, 255, 120, 0.6),
        glow: false,
        weight: 0.35,
    },
    Layer {
        name: "middle",
        size: 16.0,
        speed: 2.5,
        trail_color: Rgba::new(0, 255, 100, 0.7),
        lead_color: Rgba::new(200, 255, 220, 0.9),
        glow: false,
        weight: 0.55,
    },
    Layer {
        name: "near",
        size: 22.0,
        speed: 5.0,
        trail_color: Rgba::new(100, 255, 150, 0.8),
        lead_color: Rgba::new(255, 255, 255, 1.0),
        glow: true,
        weight: 0.10,
    },
];

/// An ordered set of layers with a precomputed cumulative distribution.
#[derive(Debug, Clone)]
pub struct LayerCatalog {
    layers: Vec<Layer>,
    /// `cumulative[i]` is the sum of weights `0..=i`.
    cumulative: Vec<f64>,
}

impl Default for LayerCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl LayerCatalog {
    /// Catalog of the shipped [`LAYERS`].
    pub fn standard() -> Self {
        Self::build(&LAYERS)
    }

    /// Build a catalog from `layers`. Returns `None` for an empty slice.
    ///
    /// Weights are taken as given; callers keep them summing to 1.0.
    pub fn new(layers: &[Layer]) -> Option<Self> {
        if layers.is_empty() {
            return None;
        }
        Some(Self::build(layers))
    }

    fn build(layers: &[Layer]) -> Self {
        let cumulative = layers
            .iter()
            .scan(0.0, |sum, layer| {
                *sum += layer.weight;
                Some(*sum)
            })
            .collect();
        Self {
            layers: layers.to_vec(),
            cumulative,
        }
    }

    /// The layers in catalog order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Pick the first layer whose cumulative weight exceeds `u`.
    ///
    /// `u` is a uniform value in `[0, 1)`. When rounding leaves the total
    /// short of `u`, the last layer is returned.
    pub fn draw(&self, u: f64) -> &Layer {
        let idx = self.cumulative.partition_point(|&c| c <= u);
        &self.layers[idx.min(self.layers.len() - 1)]
    }

    /// Draw a layer using a uniform sample from `rng`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> &Layer {
        let u: f64 = rng.random();
        let layer = self.draw(u);
        trace!("drew layer {} (u = {u:.4})", layer.name);
        layer
    }

    /// Mean glyph size over all layers.
    pub fn average_size(&self) -> f32 {
        let total: f32 = self.layers.iter().map(|l| l.size).sum();
        total / self.layers.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_shipped_weights_sum_to_one() {
        let total: f64 = LAYERS.iter().map(|l| l.weight).sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_draw_walks_cumulative_weights() {
        let catalog = LayerCatalog::standard();
        assert_eq!(catalog.draw(0.0).name, "far");
        assert_eq!(catalog.draw(0.3499).name, "far");
        assert_eq!(catalog.draw(0.35).name, "middle");
        assert_eq!(catalog.draw(0.8999).name, "middle");
        assert_eq!(catalog.draw(0.95).name, "near");
        assert_eq!(catalog.draw(0.999_999).name, "near");
    }

    #[test]
    fn test_draw_never_misses() {
        let short = [
            Layer {
                weight: 0.3,
                ..LAYERS[0]
            },
            Layer {
                weight: 0.3,
                ..LAYERS[1]
            },
        ];
        let catalog = LayerCatalog::new(&short).unwrap();
        assert_eq!(catalog.draw(0.75).name, "middle");
        assert_eq!(LayerCatalog::standard().draw(1.0).name, "near");
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(LayerCatalog::new(&[]).is_none());
    }

    #[test]
    fn test_sample_follows_weights() {
        let catalog = LayerCatalog::standard();
        let mut rng = StdRng::seed_from_u64(7);
        let draws = 100_000;
        let mut counts = [0usize; 3];
        for _ in 0..draws {
            let layer = catalog.sample(&mut rng);
            let idx = LAYERS.iter().position(|l| l.name == layer.name).unwrap();
            counts[idx] += 1;
        }
        for (count, layer) in counts.iter().zip(LAYERS.iter()) {
            let share = *count as f64 / draws as f64;
            assert!(
                (share - layer.weight).abs() < 0.01,
                "{}: {share} vs {}",
                layer.name,
                layer.weight
            );
        }
    }

    #[test]
    fn test_average_size() {
        let avg = LayerCatalog::standard().average_size();
        assert!((avg - 50.0 / 3.0).abs() < 1e-4);
    }
}
