use crate::animation::interpolate::{Extrapolation, interpolate};
use crate::foundation::core::Fps;
use crate::scene::component::{FrameCtx, SceneComponent};
use crate::scene::model::{Element, Font, Glow, Layer, TextBlock, TextSpan};
use crate::scene::palette::{CYAN, WHITE};

/// Frames spent on each typed character.
pub const CHAR_FRAMES: u64 = 10;
/// Period of the cursor blink.
pub const CURSOR_BLINK_FRAMES: u64 = 16;
const PROMPT: &str = "> ";
const CURSOR: &str = "\u{258C}";
const MAX_GLOW_BLUR: f64 = 20.0;
const PULSE_BLUR: f64 = 4.0;

/// Terminal-style title: a prompt, the title typed one character at a time, a blinking cursor
/// and a glow that grows with the typed text.
#[derive(Clone, Debug)]
pub struct TypedTitle {
    text: String,
}

impl TypedTitle {
    /// Title that types out `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Number of characters in the full title.
    pub fn len_chars(&self) -> usize {
        self.text.chars().count()
    }

    /// First frame of the typing phase.
    pub fn typing_start_frame(fps: Fps) -> u64 {
        fps.secs_to_frames(0.5)
    }

    /// Frame at which the last character appears.
    pub fn typing_end_frame(&self, fps: Fps) -> u64 {
        Self::typing_start_frame(fps) + self.len_chars() as u64 * CHAR_FRAMES
    }

    /// Characters visible at `frame`; non-decreasing in `frame`.
    pub fn chars_typed(&self, frame: u64, fps: Fps) -> usize {
        let typing = frame.saturating_sub(Self::typing_start_frame(fps));
        let typed = usize::try_from(typing / CHAR_FRAMES).unwrap_or(usize::MAX);
        typed.min(self.len_chars())
    }

    /// The cursor stays up until two seconds after typing finished.
    pub fn cursor_visible(&self, frame: u64, fps: Fps) -> bool {
        (frame as f64) < self.typing_end_frame(fps) as f64 + 2.0 * fps.as_f64()
    }

    /// Triangle-wave blink: fully on at the start of each period, off halfway.
    pub fn cursor_opacity(frame: u64) -> f64 {
        let period = CURSOR_BLINK_FRAMES as f64;
        interpolate(
            (frame % CURSOR_BLINK_FRAMES) as f64,
            [0.0, period / 2.0, period],
            [1.0, 0.0, 1.0],
            Extrapolation::CLAMP,
        )
    }

    /// Prompt fade-in over the first 0.3 s.
    pub fn prompt_opacity(frame: u64, fps: Fps) -> f64 {
        let fade = fps.secs_to_frames(0.3).max(1) as f64;
        interpolate(
            frame as f64,
            [0.0, fade],
            [0.0, 1.0],
            Extrapolation::CLAMP_RIGHT,
        )
    }

    /// Glow blur radius and glow opacity at `frame`.
    pub fn glow(&self, frame: u64, fps: Fps) -> (f64, f64) {
        let len = self.len_chars();
        let typed = self.chars_typed(frame, fps);
        let progress = if len > 0 {
            typed as f64 / len as f64
        } else {
            0.0
        };
        let blur = interpolate(
            progress,
            [0.0, 1.0],
            [0.0, MAX_GLOW_BLUR],
            Extrapolation::EXTEND,
        );
        let opacity = interpolate(progress, [0.0, 1.0], [0.5, 1.0], Extrapolation::EXTEND);

        let pulse = if typed >= len {
            let period = 2.0 * fps.as_f64();
            let post = frame.saturating_sub(self.typing_end_frame(fps)) as f64;
            interpolate(
                post % period,
                [0.0, fps.as_f64(), period],
                [0.0, PULSE_BLUR, 0.0],
                Extrapolation::CLAMP_RIGHT,
            )
        } else {
            0.0
        };

        (blur + pulse, opacity)
    }
}

impl SceneComponent for TypedTitle {
    fn name(&self) -> &'static str {
        "typed_title"
    }

    fn render(&self, ctx: &FrameCtx<'_>) -> Option<Layer> {
        let typed: String = self
            .text
            .chars()
            .take(self.chars_typed(ctx.frame, ctx.fps))
            .collect();

        let mut spans = vec![TextSpan::new(PROMPT, CYAN), TextSpan::new(typed, WHITE)];
        if self.cursor_visible(ctx.frame, ctx.fps) {
            spans.push(TextSpan {
                opacity: Self::cursor_opacity(ctx.frame),
                ..TextSpan::new(CURSOR, CYAN)
            });
        }

        let (blur, glow_opacity) = self.glow(ctx.frame, ctx.fps);
        let text = TextBlock {
            anchor: ctx.canvas.center(),
            offset_y: 0.0,
            font: Font {
                family: "JetBrains Mono".to_owned(),
                fallback: "monospace".to_owned(),
                size: 90.0,
                weight: 700,
            },
            letter_spacing: 6.0,
            opacity: Self::prompt_opacity(ctx.frame, ctx.fps),
            spans,
            shadows: vec![
                Glow {
                    blur,
                    color: CYAN,
                    opacity: 1.0,
                },
                Glow {
                    blur: blur * 2.0,
                    color: CYAN,
                    opacity: glow_opacity * 0.3,
                },
            ],
        };

        Some(Layer::new(self.name(), vec![Element::Text(text)]))
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/scene/typed_title.rs"]
mod tests;
