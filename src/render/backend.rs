use std::path::PathBuf;

use crate::foundation::error::IntroResult;
use crate::scene::model::FrameScene;

/// A rendered frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha**; the flag makes that explicit at API boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

/// Turns evaluated scenes into pixels.
pub trait RenderBackend {
    /// Rasterize one scene.
    fn render_scene(&mut self, scene: &FrameScene) -> IntroResult<FrameRGBA>;

    /// Settings needed to build equivalent worker backends for parallel rendering.
    fn worker_render_settings(&self) -> Option<RenderSettings> {
        None
    }
}

/// Available backend kinds.
#[derive(Clone, Copy, Debug, Default)]
pub enum BackendKind {
    /// SVG serialization rasterized with `resvg`.
    #[default]
    Svg,
}

/// Backend-agnostic settings.
#[derive(Clone, Debug)]
pub struct RenderSettings {
    /// Output pixels per canvas unit.
    pub scale: f64,
    /// If set, the target is cleared to this RGBA8 colour before drawing.
    pub clear_rgba: Option<[u8; 4]>,
    /// Extra directory scanned for fonts.
    pub fonts_dir: Option<PathBuf>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            scale: 1.0,
            clear_rgba: None,
            fonts_dir: None,
        }
    }
}

/// Create a rendering backend.
pub fn create_backend(
    kind: BackendKind,
    settings: &RenderSettings,
) -> IntroResult<Box<dyn RenderBackend>> {
    match kind {
        BackendKind::Svg => Ok(Box::new(crate::render::raster::SvgBackend::new(
            settings.clone(),
        )?)),
    }
}
