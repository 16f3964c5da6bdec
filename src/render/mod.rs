//! Render boundary: scene graph → SVG → RGBA8 pixels, one frame or a whole range.

pub mod backend;
pub mod fingerprint;
pub mod pipeline;
pub mod raster;
pub mod svg;
