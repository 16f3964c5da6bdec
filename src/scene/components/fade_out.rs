use crate::animation::interpolate::{Extrapolation, interpolate};
use crate::scene::component::{FrameCtx, SceneComponent};
use crate::scene::model::{Element, Layer, Paint};
use crate::scene::palette::INK;

/// Full-canvas cover ramping to opaque over two seconds.
#[derive(Clone, Copy, Debug, Default)]
pub struct FadeOut;

impl SceneComponent for FadeOut {
    fn name(&self) -> &'static str {
        "fade_out"
    }

    fn render(&self, ctx: &FrameCtx<'_>) -> Option<Layer> {
        let opacity = interpolate(
            ctx.frame as f64,
            [0.0, 2.0 * ctx.fps.as_f64()],
            [0.0, 1.0],
            Extrapolation::CLAMP,
        );
        let paint = Paint::Solid { color: INK };
        Some(Layer::new(self.name(), vec![Element::Fill { paint }]).with_opacity(opacity))
    }
}
