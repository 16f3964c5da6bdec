use crate::audio::spectrum::SpectrumSource;
use crate::foundation::core::{Canvas, Fps, FrameIndex};
use crate::scene::model::Layer;

/// Inputs available to a component for one frame.
#[derive(Clone, Copy)]
pub struct FrameCtx<'a> {
    /// Frame relative to the component's sequence start.
    pub frame: u64,
    /// Frame in composition time.
    pub global_frame: FrameIndex,
    /// Composition frame rate.
    pub fps: Fps,
    /// Output canvas.
    pub canvas: Canvas,
    /// Audio analysis, when the composition has an audio track.
    pub spectrum: Option<&'a dyn SpectrumSource>,
}

impl std::fmt::Debug for FrameCtx<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameCtx")
            .field("frame", &self.frame)
            .field("global_frame", &self.global_frame)
            .field("fps", &self.fps)
            .field("canvas", &self.canvas)
            .field("spectrum", &self.spectrum.is_some())
            .finish()
    }
}

/// A stateless visual layer of the intro.
///
/// `render` must be a pure function of the context: the same context always yields the same
/// layer, whatever frames were rendered before. `None` means nothing is drawn for this frame.
pub trait SceneComponent: Send + Sync {
    /// Stable layer name used in scene output and logs.
    fn name(&self) -> &'static str;

    /// Evaluate the layer for one frame.
    fn render(&self, ctx: &FrameCtx<'_>) -> Option<Layer>;
}
