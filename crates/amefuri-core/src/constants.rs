//! Fixed tuning constants of the rain effect.

use std::time::Duration;

use crate::Rgba;

/// Glyphs a column is made of: katakana, Latin capitals and digits.
pub const CHARACTER_SET: &[char] = &[
    'ア', 'イ', 'ウ', 'エ', 'オ', 'カ', 'キ', 'ク', 'ケ', 'コ', 'サ', 'シ', 'ス', 'セ', 'ソ', 'タ',
    'チ', 'ツ', 'テ', 'ト', 'ナ', 'ニ', 'ヌ', 'ネ', 'ノ', 'ハ', 'ヒ', 'フ', 'ヘ', 'ホ', 'マ', 'ミ',
    'ム', 'メ', 'モ', 'ヤ', 'ユ', 'ヨ', 'ラ', 'リ', 'ル', 'レ', 'ロ', 'ワ', 'ヲ', 'ン', 'A', 'B',
    'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U',
    'V', 'W', 'X', 'Y', 'Z', '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
];

/// Fraction of the width filled with columns (0 to 1).
pub const DENSITY: f32 = 0.8;

/// Per-frame chance that a column swaps one of its glyphs.
pub const FLICKER_CHANCE: f64 = 0.02;

/// Vertical distance between glyphs as a multiple of the glyph size.
pub const VERTICAL_SPACING: f32 = 1.5;

/// Columns start up to this many surface heights above the top edge.
pub const START_DEPTH: f32 = 1.5;

/// One extra glyph of potential length per this many pixels of height.
pub const LENGTH_DIVISOR: f32 = 25.0;

/// Shortest column, in glyphs.
pub const MIN_LENGTH: usize = 10;

/// Painted over the whole surface each frame to fade older glyphs.
pub const OVERLAY_COLOR: Rgba = Rgba::new(0, 0, 0, 0.05);

/// Shadow color of a glowing lead glyph (`#0fa`).
pub const GLOW_COLOR: Rgba = Rgba::opaque(0, 255, 170);

/// Shadow blur radius of a glowing lead glyph, in pixels.
pub const GLOW_BLUR: f32 = 10.0;

/// Length of the show/hide opacity transition.
pub const FADE_DURATION: Duration = Duration::from_millis(500);
