//! Intro colour palette.

use crate::foundation::core::Rgb8;

/// Accent colour for particles, nodes, prompt and glow.
pub const CYAN: Rgb8 = Rgb8::new(0x00, 0xd4, 0xff);
/// Centre of the background gradient.
pub const NAVY: Rgb8 = Rgb8::new(0x0d, 0x15, 0x20);
/// Edge of the background gradient and the fade-out colour.
pub const INK: Rgb8 = Rgb8::new(0x0a, 0x0a, 0x14);
/// Title and caption text.
pub const WHITE: Rgb8 = Rgb8::new(0xff, 0xff, 0xff);
