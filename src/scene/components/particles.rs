use crate::animation::drift::Drift;
use crate::animation::spring::{SpringConfig, spring, tenths_to_frames};
use crate::foundation::core::Vec2;
use crate::layout::particles::particles;
use crate::scene::component::{FrameCtx, SceneComponent};
use crate::scene::model::{Element, Glow, Layer};
use crate::scene::palette::CYAN;

const ENTRANCE: SpringConfig = SpringConfig::with_damping(200.0);
const DRIFT_Y_RATE: f64 = 0.6;

/// Small glowing dots floating over the backdrop.
#[derive(Clone, Copy, Debug, Default)]
pub struct Particles;

impl SceneComponent for Particles {
    fn name(&self) -> &'static str {
        "particles"
    }

    fn render(&self, ctx: &FrameCtx<'_>) -> Option<Layer> {
        let elements = particles()
            .iter()
            .map(|p| {
                let entrance = spring(
                    ctx.frame,
                    ctx.fps,
                    ENTRANCE,
                    tenths_to_frames(p.delay, ctx.fps),
                );
                let drift = Drift {
                    amplitude: p.drift_amplitude(),
                    speed: p.speed,
                    y_rate: DRIFT_Y_RATE,
                };
                // Positions address the top-left corner of the dot's box.
                let corner = drift.apply(p.position, ctx.frame, ctx.fps);
                Element::Circle {
                    center: corner + Vec2::new(p.size / 2.0, p.size / 2.0),
                    radius: p.size / 2.0,
                    color: CYAN,
                    opacity: entrance * p.opacity,
                    glow: Some(Glow {
                        blur: p.size * 2.0,
                        color: CYAN,
                        opacity: 1.0,
                    }),
                }
            })
            .collect();
        Some(Layer::new(self.name(), elements))
    }
}
