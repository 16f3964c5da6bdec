use crate::foundation::core::{Fps, Point, Vec2};

/// Periodic positional wobble around a fixed base point.
///
/// `x = sin(t * speed) * amplitude.x`, `y = cos(t * speed * y_rate) * amplitude.y` with `t` in
/// seconds. A `y_rate` different from one keeps the two axes out of phase.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Drift {
    /// Peak offset per axis.
    pub amplitude: Vec2,
    /// Angular speed in radians per second.
    pub speed: f64,
    /// Multiplier applied to `speed` on the y axis.
    pub y_rate: f64,
}

impl Drift {
    /// Offset from the base point at `frame`.
    pub fn offset(&self, frame: u64, fps: Fps) -> Vec2 {
        let t = fps.frames_to_secs(frame);
        Vec2::new(
            (t * self.speed).sin() * self.amplitude.x,
            (t * self.speed * self.y_rate).cos() * self.amplitude.y,
        )
    }

    /// `base` displaced by [`Drift::offset`].
    pub fn apply(&self, base: Point, frame: u64, fps: Fps) -> Point {
        base + self.offset(frame, fps)
    }
}
