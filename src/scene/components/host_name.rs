use crate::animation::interpolate::{Extrapolation, interpolate};
use crate::animation::spring::{SpringConfig, spring};
use crate::scene::component::{FrameCtx, SceneComponent};
use crate::scene::model::{Element, Font, Layer, TextBlock, TextSpan};
use crate::scene::palette::WHITE;

const ENTRANCE: SpringConfig = SpringConfig::with_damping(15.0);
/// Distance below the canvas centre.
const BASELINE_OFFSET: f64 = 70.0;
const RISE: f64 = 30.0;
const MAX_OPACITY: f64 = 0.7;

/// Caption under the title that rises into place.
#[derive(Clone, Debug)]
pub struct HostName {
    caption: String,
}

impl HostName {
    /// Caption showing `caption`.
    pub fn new(caption: impl Into<String>) -> Self {
        Self {
            caption: caption.into(),
        }
    }

    /// Vertical offset and opacity at `frame`.
    pub fn motion(frame: u64, fps: crate::foundation::core::Fps) -> (f64, f64) {
        let entrance = spring(frame, fps, ENTRANCE, 0);
        let offset = interpolate(entrance, [0.0, 1.0], [RISE, 0.0], Extrapolation::EXTEND);
        let opacity = interpolate(
            entrance,
            [0.0, 1.0],
            [0.0, MAX_OPACITY],
            Extrapolation::EXTEND,
        );
        (offset, opacity)
    }
}

impl SceneComponent for HostName {
    fn name(&self) -> &'static str {
        "host_name"
    }

    fn render(&self, ctx: &FrameCtx<'_>) -> Option<Layer> {
        let (offset_y, opacity) = Self::motion(ctx.frame, ctx.fps);
        let mut anchor = ctx.canvas.center();
        anchor.y += BASELINE_OFFSET;
        let text = TextBlock {
            anchor,
            offset_y,
            font: Font {
                family: "Montserrat".to_owned(),
                fallback: "sans-serif".to_owned(),
                size: 28.0,
                weight: 400,
            },
            letter_spacing: 4.0,
            opacity,
            spans: vec![TextSpan::new(self.caption.clone(), WHITE)],
            shadows: Vec::new(),
        };
        Some(Layer::new(self.name(), vec![Element::Text(text)]))
    }
}
