//! Core types for the amefuri digital rain.
//!
//! Holds the depth-layer catalog, the RGBA color type shared by the
//! simulator and its surfaces, and the fixed constants of the effect.

mod color;
pub mod constants;
mod layer;

pub use color::Rgba;
pub use layer::{LAYERS, Layer, LayerCatalog};
