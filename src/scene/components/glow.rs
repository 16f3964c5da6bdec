use crate::audio::spectrum::{SPECTRUM_BINS, bass_intensity};
use crate::foundation::core::{FrameIndex, Vec2};
use crate::scene::component::{FrameCtx, SceneComponent};
use crate::scene::model::{Element, GradientStop, Layer, Paint, RadialGradient};
use crate::scene::palette::CYAN;

const MAX_OPACITY: f64 = 0.12;
const GAIN: f64 = 0.3;

/// Cyan bloom that breathes with the bass of the soundtrack.
#[derive(Clone, Copy, Debug, Default)]
pub struct AudioReactiveGlow;

impl AudioReactiveGlow {
    /// Glow opacity and scale for a bass intensity.
    pub fn response(bass: f64) -> (f64, f64) {
        ((bass * GAIN).min(MAX_OPACITY), 1.0 + bass * GAIN)
    }
}

impl SceneComponent for AudioReactiveGlow {
    fn name(&self) -> &'static str {
        "audio_glow"
    }

    fn render(&self, ctx: &FrameCtx<'_>) -> Option<Layer> {
        let Some(source) = ctx.spectrum else {
            tracing::trace!(frame = ctx.global_frame.0, "no audio track, glow skipped");
            return None;
        };
        // Sequence-local time: the track is read from its start when the glow enters.
        let local = FrameIndex(ctx.frame);
        let Some(frequencies) = source.frequencies(local, ctx.fps, SPECTRUM_BINS) else {
            tracing::debug!(
                frame = ctx.global_frame.0,
                local = ctx.frame,
                "no spectrum for frame, glow skipped"
            );
            return None;
        };

        let (opacity, scale) = Self::response(bass_intensity(&frequencies));
        let paint = Paint::Radial(RadialGradient {
            center: Vec2::new(0.5, 0.45),
            radius: Vec2::new(0.5, 0.55).hypot(),
            stops: vec![
                GradientStop {
                    offset: 0.0,
                    color: CYAN,
                    opacity,
                },
                GradientStop {
                    offset: 0.6,
                    color: CYAN,
                    opacity: 0.0,
                },
            ],
        });
        Some(Layer::new(self.name(), vec![Element::Fill { paint }]).with_scale(scale))
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/scene/glow.rs"]
mod tests;
