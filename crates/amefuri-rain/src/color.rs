//! Color compositing for cell surfaces.

use amefuri_core::Rgba;
use ratatui::style::Color;

/// Paint `src` over `dst` with source-over alpha compositing.
pub fn composite(dst: [f32; 3], src: Rgba) -> [f32; 3] {
    let a = src.a.clamp(0.0, 1.0);
    let s = src.channels();
    [
        dst[0] * (1.0 - a) + s[0] * a,
        dst[1] * (1.0 - a) + s[1] * a,
        dst[2] * (1.0 - a) + s[2] * a,
    ]
}

/// Relative luminance of a linear color.
pub fn luminance(c: [f32; 3]) -> f32 {
    0.2126 * c[0] + 0.7152 * c[1] + 0.0722 * c[2]
}

/// Convert a color to a terminal color, dimmed by `opacity` against black.
pub fn to_terminal_color(c: [f32; 3], opacity: f32) -> Color {
    let opacity = opacity.clamp(0.0, 1.0);
    let channel = |v: f32| (v.clamp(0.0, 1.0) * opacity * 255.0).round() as u8;
    Color::Rgb(channel(c[0]), channel(c[1]), channel(c[2]))
}
