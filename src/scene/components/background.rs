use crate::animation::interpolate::{Extrapolation, interpolate};
use crate::foundation::core::Vec2;
use crate::scene::component::{FrameCtx, SceneComponent};
use crate::scene::model::{Element, GradientStop, Layer, Paint, RadialGradient};
use crate::scene::palette::{INK, NAVY};

/// Dark radial backdrop fading in over half a second.
#[derive(Clone, Copy, Debug, Default)]
pub struct Background;

impl SceneComponent for Background {
    fn name(&self) -> &'static str {
        "background"
    }

    fn render(&self, ctx: &FrameCtx<'_>) -> Option<Layer> {
        let opacity = interpolate(
            ctx.frame as f64,
            [0.0, 0.5 * ctx.fps.as_f64()],
            [0.0, 1.0],
            Extrapolation::CLAMP_RIGHT,
        );
        let paint = Paint::Radial(RadialGradient {
            center: Vec2::new(0.5, 0.4),
            // Distance from the centre to the farthest corner in box units.
            radius: Vec2::new(0.5, 0.6).hypot(),
            stops: vec![
                GradientStop {
                    offset: 0.0,
                    color: NAVY,
                    opacity: 1.0,
                },
                GradientStop {
                    offset: 0.7,
                    color: INK,
                    opacity: 1.0,
                },
            ],
        });
        Some(Layer::new(self.name(), vec![Element::Fill { paint }]).with_opacity(opacity))
    }
}
