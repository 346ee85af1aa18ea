//! Digital rain simulation and rendering.
//!
//! A [`RainController`] owns a set of falling [`RainColumn`]s and paints
//! them on a [`Surface`] once per frame. Frames are requested from a
//! [`FrameScheduler`]; [`CellCanvas`] is a surface backed by terminal cells
//! that can be drawn with ratatui.

mod canvas;
mod color;
mod column;
mod controller;
mod fade;
mod scheduler;
mod surface;

pub use canvas::{CanvasView, Cell, CellCanvas};
pub use color::{composite, luminance, to_terminal_color};
pub use column::RainColumn;
pub use controller::RainController;
pub use fade::Fade;
pub use scheduler::{FrameHandle, FrameQueue, FrameScheduler};
pub use surface::{GlyphPaint, Shadow, Surface};
